//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of the voxel
//! world and translates world block coordinates into chunk-local ones.
//!
//! ## Architecture
//!
//! Chunks are keyed by their [`ChunkPosition`] in a hash map. All chunks within
//! the configured radius of the origin are generated and meshed when the world
//! is created; no chunk is created lazily and none is ever removed.
//!
//! ## Coordinates
//!
//! World X/Z map to a chunk with floor division and to a local coordinate with
//! the matching non-negative remainder, so `-1` lands in chunk `-1` at local
//! `15`. Y is shared between world and chunk space.
//!
//! ## Edits
//!
//! A successful `set_block` rebuilds the owning chunk's mesh immediately. When
//! the edited block sits on the chunk's X or Z boundary, the chunk across that
//! boundary is remeshed as well.

use std::collections::HashMap;

use log::{debug, info};

use super::block::block_type::BlockType;
use super::chunk::chunk_generation::TerrainGenerator;
use super::chunk::{Chunk, ChunkPosition, CHUNK_SIZE};
use crate::engine_state::config::{EngineConfig, TerrainConfig};

/// Splits world X/Z coordinates into the owning chunk and local X/Z.
pub fn world_to_chunk(world_x: i32, world_z: i32) -> (ChunkPosition, i32, i32) {
    let position = ChunkPosition::new(world_x.div_euclid(CHUNK_SIZE), world_z.div_euclid(CHUNK_SIZE));
    (
        position,
        world_x.rem_euclid(CHUNK_SIZE),
        world_z.rem_euclid(CHUNK_SIZE),
    )
}

/// Inverse of [`world_to_chunk`].
pub fn chunk_to_world(position: ChunkPosition, local_x: i32, local_z: i32) -> (i32, i32) {
    (
        position.x * CHUNK_SIZE + local_x,
        position.z * CHUNK_SIZE + local_z,
    )
}

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{BlockType, TerrainConfig, World};
///
/// let mut world = World::empty(TerrainConfig::default());
/// world.generate_chunk(0, 0);
/// world.set_block(0, 40, 0, BlockType::STONE);
/// assert_eq!(world.get_block(0, 40, 0), BlockType::STONE);
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkPosition, Chunk>,
    /// Terrain generator for new chunks.
    generator: TerrainGenerator,
}

impl World {
    /// Creates a world and generates every chunk within `config.world.chunk_radius`
    /// of the origin.
    pub fn new(config: &EngineConfig) -> Self {
        let mut world = Self::empty(config.terrain.clone());
        let radius = config.world.chunk_radius.max(0);

        for x in -radius..=radius {
            for z in -radius..=radius {
                world.generate_chunk(x, z);
            }
        }

        info!(
            "Generated {} chunks (radius {radius}, {:?} terrain)",
            world.chunks.len(),
            config.terrain.method
        );
        world
    }

    /// Creates a world with no chunks.
    pub fn empty(terrain: TerrainConfig) -> Self {
        World {
            chunks: HashMap::new(),
            generator: TerrainGenerator::new(terrain),
        }
    }

    /// Generates and meshes the chunk at `(chunk_x, chunk_z)` if it does not
    /// exist yet. An existing chunk is left untouched.
    ///
    /// # Returns
    /// `true` if a new chunk was created.
    pub fn generate_chunk(&mut self, chunk_x: i32, chunk_z: i32) -> bool {
        let position = ChunkPosition::new(chunk_x, chunk_z);
        if self.chunks.contains_key(&position) {
            return false;
        }

        let mut chunk = self.generator.generate(position);
        chunk.rebuild_mesh();
        self.chunks.insert(position, chunk);
        true
    }

    /// Stores a chunk, replacing any chunk at the same position, and meshes it.
    pub fn insert_chunk(&mut self, mut chunk: Chunk) {
        if let Some(previous) = self.chunks.get(&chunk.position()) {
            chunk.succeed(previous);
        }
        chunk.rebuild_mesh();
        self.chunks.insert(chunk.position(), chunk);
    }

    pub fn chunk(&self, position: ChunkPosition) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Gets the block at world coordinates. Cells in chunks that do not exist
    /// read as [`BlockType::AIR`].
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        let (position, local_x, local_z) = world_to_chunk(x, z);
        self.chunks
            .get(&position)
            .map(|chunk| chunk.get_block(local_x, y, local_z))
            .unwrap_or(BlockType::AIR)
    }

    /// Whether the cell containing the point `(x, y, z)` holds a solid block.
    pub fn is_solid_at(&self, x: f32, y: f32, z: f32) -> bool {
        self.get_block(x.floor() as i32, y.floor() as i32, z.floor() as i32)
            .is_solid()
    }

    /// Sets the block at world coordinates and remeshes what the edit touched.
    ///
    /// Writes into missing chunks or outside the world height are ignored.
    ///
    /// # Returns
    /// `true` if the block buffer was changed.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        let (position, local_x, local_z) = world_to_chunk(x, z);
        let Some(chunk) = self.chunks.get_mut(&position) else {
            return false;
        };
        if !chunk.set_block(local_x, y, local_z, block_type) {
            return false;
        }
        chunk.rebuild_mesh();
        debug!("Set ({x}, {y}, {z}) to {block_type:?} in chunk {position:?}");

        for neighbor in Self::boundary_neighbors(position, local_x, local_z) {
            if let Some(neighbor_chunk) = self.chunks.get_mut(&neighbor) {
                neighbor_chunk.rebuild_mesh();
            }
        }

        true
    }

    /// Chunks sharing a boundary plane with the local coordinate.
    fn boundary_neighbors(position: ChunkPosition, local_x: i32, local_z: i32) -> Vec<ChunkPosition> {
        let mut neighbors = Vec::new();
        if local_x == 0 {
            neighbors.push(position.offset(-1, 0));
        }
        if local_x == CHUNK_SIZE - 1 {
            neighbors.push(position.offset(1, 0));
        }
        if local_z == 0 {
            neighbors.push(position.offset(0, -1));
        }
        if local_z == CHUNK_SIZE - 1 {
            neighbors.push(position.offset(0, 1));
        }
        neighbors
    }

    /// The y just above the highest solid block of the world column `(x, z)`.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        let (position, local_x, local_z) = world_to_chunk(x, z);
        self.chunks
            .get(&position)
            .and_then(|chunk| chunk.surface_height(local_x, local_z))
    }
}
