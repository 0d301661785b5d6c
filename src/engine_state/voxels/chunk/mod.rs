//! # Chunk Module
//!
//! This module provides the `Chunk` struct which owns one 16x64x16 column of
//! the world, plus the procedural generator that fills it.
//!
//! ## Storage
//!
//! Blocks live in a single flat buffer indexed by `x + z * CHUNK_SIZE + y * CHUNK_PLANE_SIZE`,
//! so a horizontal layer is contiguous in memory. The buffer is the only source
//! of truth; the chunk's mesh is derived from it and can be rebuilt at any time.
//!
//! ## Bounds
//!
//! Reads outside the chunk return [`BlockType::AIR`] and writes outside the
//! chunk are ignored. Neither ever panics.

use cgmath::Point3;

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use crate::engine_state::rendering::meshing::ChunkMesh;

pub mod chunk_generation;

/// The width and depth of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The height of a chunk in blocks. Chunks span the full world height.
pub const CHUNK_HEIGHT: i32 = 64;
/// The number of blocks in a single horizontal layer of a chunk.
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * CHUNK_HEIGHT as usize;

/// Chunk coordinates on the horizontal grid of chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

impl ChunkPosition {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The world block coordinate of this chunk's minimum corner.
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }

    /// The chunk position offset by `(dx, dz)` chunks.
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }
}

/// A 16x64x16 block of the voxel world and its cached surface mesh.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: ChunkPosition,
    /// Flat block buffer, see the module docs for the layout.
    blocks: Vec<BlockType>,
    /// Mesh built from `blocks` by the last call to `rebuild_mesh`.
    mesh: Option<ChunkMesh>,
    /// Number of times the mesh has been rebuilt.
    mesh_revision: u64,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air) without a mesh.
    pub fn empty(position: ChunkPosition) -> Self {
        Chunk {
            position,
            blocks: vec![BlockType::AIR; CHUNK_VOLUME],
            mesh: None,
            mesh_revision: 0,
        }
    }

    /// Creates a chunk from an existing block buffer in storage order.
    ///
    /// # Returns
    /// `None` if `blocks` does not hold exactly [`CHUNK_VOLUME`] entries.
    pub fn from_blocks(position: ChunkPosition, blocks: Vec<BlockType>) -> Option<Self> {
        if blocks.len() != CHUNK_VOLUME {
            return None;
        }

        Some(Chunk {
            position,
            blocks,
            mesh: None,
            mesh_revision: 0,
        })
    }

    pub fn position(&self) -> ChunkPosition {
        self.position
    }

    /// The blocks of this chunk in storage order.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Maps chunk-relative coordinates to an index in the block buffer.
    ///
    /// # Returns
    /// `None` for any coordinate outside the chunk.
    pub fn index_of(x: i32, y: i32, z: i32) -> Option<usize> {
        if !(0..CHUNK_SIZE).contains(&x)
            || !(0..CHUNK_HEIGHT).contains(&y)
            || !(0..CHUNK_SIZE).contains(&z)
        {
            return None;
        }

        Some(x as usize + z as usize * CHUNK_SIZE as usize + y as usize * CHUNK_PLANE_SIZE)
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// Out-of-bounds coordinates read as [`BlockType::AIR`].
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        Self::index_of(x, y, z)
            .map(|index| self.blocks[index])
            .unwrap_or(BlockType::AIR)
    }

    /// Sets the block at the specified chunk-relative coordinates.
    ///
    /// Only the block buffer changes; call [`Chunk::rebuild_mesh`] to bring
    /// the mesh up to date.
    ///
    /// # Returns
    /// `true` if the coordinates were in bounds and the write happened.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        match Self::index_of(x, y, z) {
            Some(index) => {
                self.blocks[index] = block_type;
                true
            }
            None => false,
        }
    }

    /// Whether the given face of the block at `(x, y, z)` should be drawn.
    ///
    /// A face is visible when the neighbouring cell is air or lies outside
    /// this chunk. Neighbouring chunks are not consulted, so faces on the
    /// chunk boundary are always visible.
    pub fn is_face_visible(&self, x: i32, y: i32, z: i32, side: BlockSide) -> bool {
        let [dx, dy, dz] = side.normal();
        match Self::index_of(x + dx, y + dy, z + dz) {
            Some(index) => !self.blocks[index].is_solid(),
            None => true,
        }
    }

    /// Discards the current mesh and builds a new one from the block buffer.
    pub fn rebuild_mesh(&mut self) {
        self.mesh = None;
        let mesh = ChunkMesh::build(self);
        self.mesh = Some(mesh);
        self.mesh_revision += 1;
    }

    /// The mesh from the last rebuild, if the chunk has been meshed.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// How many times the mesh has been rebuilt.
    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    /// Continues counting mesh rebuilds from a chunk this one replaces, so
    /// revisions at a position never repeat.
    pub(crate) fn succeed(&mut self, previous: &Chunk) {
        self.mesh_revision = self.mesh_revision.max(previous.mesh_revision);
    }

    /// The y coordinate just above the highest solid block in a column, or
    /// `None` if the column is empty or out of bounds.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        if Self::index_of(x, 0, z).is_none() {
            return None;
        }

        (0..CHUNK_HEIGHT)
            .rev()
            .find(|y| self.get_block(x, *y, z).is_solid())
            .map(|y| y + 1)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn set_then_get_round_trips_in_bounds() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        assert!(chunk.set_block(3, 40, 15, BlockType::STONE));
        assert_eq!(chunk.get_block(3, 40, 15), BlockType::STONE);
        assert_eq!(chunk.get_block(3, 41, 15), BlockType::AIR);
    }

    #[test_case(-1, 0, 0 ; "negative x")]
    #[test_case(16, 0, 0 ; "x past edge")]
    #[test_case(0, -1, 0 ; "below bedrock")]
    #[test_case(0, 64, 0 ; "above ceiling")]
    #[test_case(0, 0, 16 ; "z past edge")]
    fn out_of_bounds_reads_air_and_writes_are_ignored(x: i32, y: i32, z: i32) {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        assert!(!chunk.set_block(x, y, z, BlockType::STONE));
        assert_eq!(chunk.get_block(x, y, z), BlockType::AIR);
        assert!(chunk.blocks().iter().all(|b| *b == BlockType::AIR));
    }

    #[test]
    fn storage_is_layered_by_y() {
        assert_eq!(Chunk::index_of(1, 0, 0), Some(1));
        assert_eq!(Chunk::index_of(0, 0, 1), Some(16));
        assert_eq!(Chunk::index_of(0, 1, 0), Some(256));
        assert_eq!(Chunk::index_of(15, 63, 15), Some(CHUNK_VOLUME - 1));
    }

    #[test]
    fn from_blocks_rejects_wrong_length() {
        let position = ChunkPosition::new(2, -3);
        assert!(Chunk::from_blocks(position, vec![BlockType::AIR; 10]).is_none());
        let chunk = Chunk::from_blocks(position, vec![BlockType::DIRT; CHUNK_VOLUME]).unwrap();
        assert_eq!(chunk.get_block(5, 5, 5), BlockType::DIRT);
    }

    #[test]
    fn boundary_faces_are_visible_even_when_covered_inside() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        chunk.set_block(0, 10, 0, BlockType::STONE);
        chunk.set_block(1, 10, 0, BlockType::STONE);
        assert!(chunk.is_face_visible(0, 10, 0, BlockSide::LEFT));
        assert!(!chunk.is_face_visible(0, 10, 0, BlockSide::RIGHT));
        assert!(chunk.is_face_visible(0, 10, 0, BlockSide::TOP));
    }

    #[test]
    fn rebuild_replaces_mesh_and_bumps_revision() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        assert!(chunk.mesh().is_none());
        chunk.rebuild_mesh();
        assert_eq!(chunk.mesh().unwrap().face_count(), 0);
        chunk.set_block(4, 4, 4, BlockType::DIRT);
        chunk.rebuild_mesh();
        assert_eq!(chunk.mesh().unwrap().face_count(), 6);
        assert_eq!(chunk.mesh_revision(), 2);
    }

    #[test]
    fn surface_height_is_one_above_top_block() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        assert_eq!(chunk.surface_height(2, 2), None);
        chunk.set_block(2, 0, 2, BlockType::STONE);
        chunk.set_block(2, 7, 2, BlockType::LEAVES);
        assert_eq!(chunk.surface_height(2, 2), Some(8));
        assert_eq!(chunk.surface_height(16, 2), None);
    }

    #[test]
    fn world_origin_scales_by_chunk_size() {
        assert_eq!(ChunkPosition::new(-2, 3).world_origin(), Point3::new(-32, 0, 48));
    }
}
