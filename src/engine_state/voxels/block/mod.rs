//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the texture atlas
//! lookup used when a face is turned into mesh geometry.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Number of tiles along each edge of the square texture atlas.
pub const ATLAS_TILES_PER_ROW: usize = 16;

/// Maps each block type to its atlas tile for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array contains 6 tile indices, one for each face in the order:
/// [Front, Back, Bottom, Top, Left, Right]
pub static BLOCK_TYPE_TO_TEXTURE_INDICES: [[usize; 6]; 6] = [
    [0, 0, 0, 0, 0, 0], // AIR (never meshed)
    [1, 1, 2, 0, 1, 1], // GRASS (top: 0, bottom: 2, sides: 1)
    [2, 2, 2, 2, 2, 2], // DIRT
    [3, 3, 3, 3, 3, 3], // STONE
    [4, 4, 5, 5, 4, 4], // WOOD (top/bottom: 5, sides: 4)
    [6, 6, 6, 6, 6, 6], // LEAVES
];

/// Gets the atlas tile used for one face of a block.
pub fn texture_index(block_type: BlockType, side: BlockSide) -> usize {
    BLOCK_TYPE_TO_TEXTURE_INDICES[block_type as usize][side as usize]
}

/// Normalized atlas bounds `(u_min, v_min, u_max, v_max)` of a tile.
pub fn tile_uv_bounds(tile: usize) -> (f32, f32, f32, f32) {
    let tile_size = 1.0 / ATLAS_TILES_PER_ROW as f32;
    let u = (tile % ATLAS_TILES_PER_ROW) as f32;
    let v = (tile / ATLAS_TILES_PER_ROW) as f32;
    (
        u * tile_size,
        v * tile_size,
        (u + 1.0) * tile_size,
        (v + 1.0) * tile_size,
    )
}
