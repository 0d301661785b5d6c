//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion from
//! the compact code stored in world snapshots.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant is the stable code written to world snapshots, so variants
/// must only ever be appended. The `FromPrimitive` derive allows conversion back
/// from that code.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An empty cell. Every uninitialized or out-of-bounds cell reads as air.
    #[default]
    AIR = 0,

    /// A grass block with different textures on top, sides and bottom.
    GRASS = 1,

    /// A basic dirt block found just below the grass layer.
    DIRT = 2,

    /// Stone, filling everything deeper than the dirt layer.
    STONE = 3,

    /// Tree trunk, with a ring texture on top and bottom and bark on the sides.
    WOOD = 4,

    /// Tree foliage.
    LEAVES = 5,
}

impl BlockType {
    /// All block types in code order.
    pub const ALL: [BlockType; 6] = [
        BlockType::AIR,
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::STONE,
        BlockType::WOOD,
        BlockType::LEAVES,
    ];

    /// Decodes a block type from its snapshot code.
    ///
    /// # Returns
    /// `None` if the code does not name a known block type.
    pub fn from_code(code: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(code)
    }

    /// The compact code used when the block is serialized.
    pub fn code(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this block occupies its cell. Only air is non-solid.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_decode_back_to_their_type() {
        for block_type in BlockType::ALL {
            assert_eq!(BlockType::from_code(block_type.code()), Some(block_type));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(BlockType::from_code(6), None);
        assert_eq!(BlockType::from_code(u8::MAX), None);
    }

    #[test]
    fn only_air_is_not_solid() {
        assert!(!BlockType::AIR.is_solid());
        assert!(BlockType::LEAVES.is_solid());
        assert_eq!(BlockType::default(), BlockType::AIR);
    }
}
