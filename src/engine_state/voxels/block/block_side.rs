//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block together with
//! the geometry each face contributes to a chunk mesh.

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a unique integer value which is used to index the
/// per-face texture table in [`super::BLOCK_TYPE_TO_TEXTURE_INDICES`].
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The offset from a block to the neighbour this face looks at.
    /// Doubles as the face's outward normal.
    pub fn normal(self) -> [i32; 3] {
        match self {
            BlockSide::FRONT => [0, 0, 1],
            BlockSide::BACK => [0, 0, -1],
            BlockSide::BOTTOM => [0, -1, 0],
            BlockSide::TOP => [0, 1, 0],
            BlockSide::LEFT => [-1, 0, 0],
            BlockSide::RIGHT => [1, 0, 0],
        }
    }

    /// Corner offsets of the face quad relative to the block's minimum corner.
    ///
    /// Corners wind counter-clockwise when viewed from outside the block, so
    /// triangles `(0, 1, 2)` and `(0, 2, 3)` face along [`BlockSide::normal`].
    pub fn corners(self) -> [[u8; 3]; 4] {
        match self {
            BlockSide::FRONT => [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
            BlockSide::BACK => [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]],
            BlockSide::BOTTOM => [[0, 0, 1], [0, 0, 0], [1, 0, 0], [1, 0, 1]],
            BlockSide::TOP => [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
            BlockSide::LEFT => [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
            BlockSide::RIGHT => [[1, 0, 1], [1, 0, 0], [1, 1, 0], [1, 1, 1]],
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;

    fn corner(c: [u8; 3]) -> Vector3<f32> {
        Vector3::new(c[0] as f32, c[1] as f32, c[2] as f32)
    }

    #[test]
    fn corner_winding_matches_normal() {
        for side in BlockSide::all() {
            let [a, b, c, _] = side.corners().map(corner);
            let winding = (b - a).cross(c - a);
            let [nx, ny, nz] = side.normal();
            assert_eq!(winding, Vector3::new(nx as f32, ny as f32, nz as f32), "{side:?}");
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let normal = side.normal();
            let axis = normal.iter().position(|n| *n != 0).unwrap();
            let plane = if normal[axis] > 0 { 1 } else { 0 };
            assert!(side.corners().iter().all(|c| c[axis] == plane), "{side:?}");
        }
    }
}
