//! # World Snapshots
//!
//! Serializable copy of the world's block data, handed to whatever saves and
//! loads worlds. A snapshot lists one block array per chunk, in chunk storage
//! order, as block codes. It also records the chunk dimensions it was taken
//! with so that a snapshot from a differently sized world is rejected.
//!
//! Loading validates the entire snapshot before touching the world. A bad
//! snapshot leaves every live chunk exactly as it was.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::block::block_type::BlockType;
use super::block::BlockTypeSize;
use super::chunk::{Chunk, ChunkPosition, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME};
use super::world::World;

/// Reasons a snapshot cannot be applied.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(
        "snapshot chunks are {found_size}x{found_height}, this world uses {expected_size}x{expected_height}"
    )]
    DimensionMismatch {
        expected_size: i32,
        expected_height: i32,
        found_size: i32,
        found_height: i32,
    },
    #[error("chunk ({x}, {z}) has {found} blocks, expected {expected}")]
    BlockCount {
        x: i32,
        z: i32,
        expected: usize,
        found: usize,
    },
    #[error("chunk ({x}, {z}) contains unknown block code {code}")]
    UnknownBlockCode { x: i32, z: i32, code: BlockTypeSize },
    #[error("chunk ({x}, {z}) appears more than once")]
    DuplicateChunk { x: i32, z: i32 },
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Block data of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSnapshot {
    pub x: i32,
    pub z: i32,
    pub blocks: Vec<BlockTypeSize>,
}

/// Block data of a whole world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub chunk_size: i32,
    pub height: i32,
    pub chunks: Vec<ChunkSnapshot>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the snapshot against this build's chunk layout and decodes it.
    fn decode(&self) -> Result<Vec<Chunk>, SnapshotError> {
        if self.chunk_size != CHUNK_SIZE || self.height != CHUNK_HEIGHT {
            return Err(SnapshotError::DimensionMismatch {
                expected_size: CHUNK_SIZE,
                expected_height: CHUNK_HEIGHT,
                found_size: self.chunk_size,
                found_height: self.height,
            });
        }

        let mut chunks: Vec<Chunk> = Vec::with_capacity(self.chunks.len());
        for snapshot in &self.chunks {
            let (x, z) = (snapshot.x, snapshot.z);
            let position = ChunkPosition::new(x, z);
            if chunks.iter().any(|chunk| chunk.position() == position) {
                return Err(SnapshotError::DuplicateChunk { x, z });
            }
            if snapshot.blocks.len() != CHUNK_VOLUME {
                return Err(SnapshotError::BlockCount {
                    x,
                    z,
                    expected: CHUNK_VOLUME,
                    found: snapshot.blocks.len(),
                });
            }

            let blocks = snapshot
                .blocks
                .iter()
                .map(|code| {
                    BlockType::from_code(*code)
                        .ok_or(SnapshotError::UnknownBlockCode { x, z, code: *code })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let chunk = Chunk::from_blocks(position, blocks).ok_or(SnapshotError::BlockCount {
                x,
                z,
                expected: CHUNK_VOLUME,
                found: snapshot.blocks.len(),
            })?;
            chunks.push(chunk);
        }

        Ok(chunks)
    }
}

impl World {
    /// Copies the block data of every chunk, ordered by chunk position.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut chunks: Vec<ChunkSnapshot> = self
            .chunks()
            .map(|chunk| ChunkSnapshot {
                x: chunk.position().x,
                z: chunk.position().z,
                blocks: chunk.blocks().iter().map(|b| b.code()).collect(),
            })
            .collect();
        chunks.sort_by_key(|chunk| (chunk.x, chunk.z));

        WorldSnapshot {
            chunk_size: CHUNK_SIZE,
            height: CHUNK_HEIGHT,
            chunks,
        }
    }

    /// Replaces the chunks named in `snapshot` with its block data and remeshes
    /// them. Chunks the snapshot does not mention are kept. Nothing changes if
    /// the snapshot is invalid.
    ///
    /// # Returns
    /// The number of chunks loaded.
    pub fn load_snapshot(&mut self, snapshot: &WorldSnapshot) -> Result<usize, SnapshotError> {
        let chunks = snapshot.decode().inspect_err(|err| {
            warn!("Rejected world snapshot: {err}");
        })?;

        let count = chunks.len();
        for chunk in chunks {
            self.insert_chunk(chunk);
        }

        info!("Loaded {count} chunks from snapshot");
        Ok(count)
    }
}
