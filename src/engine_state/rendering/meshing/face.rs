use cgmath::Point3;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::{
    block_side::BlockSide, block_type::BlockType, texture_index, tile_uv_bounds,
};

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is identified by the block it belongs to and which side of the
/// block it represents; its corners and texture follow from those.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The block's position in chunk coordinates
    pub position: Point3<i32>,
    /// The block type, used for texture mapping
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    pub fn new(position: Point3<i32>, block_type: BlockType, block_side: BlockSide) -> Self {
        Face {
            position,
            block_type,
            block_side,
        }
    }

    /// Generates the four corner vertices of the face.
    ///
    /// The vertices are ordered to form two triangles when combined with the
    /// indices from [`Face::indices`].
    pub fn vertices(&self) -> [Vertex; 4] {
        let (u_min, v_min, u_max, v_max) =
            tile_uv_bounds(texture_index(self.block_type, self.block_side));
        let tex_coords = [[u_min, v_max], [u_max, v_max], [u_max, v_min], [u_min, v_min]];
        let normal = self.block_side.normal().map(|n| n as f32);
        let corners = self.block_side.corners();

        std::array::from_fn(|i| {
            let [cx, cy, cz] = corners[i];
            Vertex::new(
                [
                    (self.position.x + cx as i32) as f32,
                    (self.position.y + cy as i32) as f32,
                    (self.position.z + cz as i32) as f32,
                ],
                normal,
                tex_coords[i],
            )
        })
    }

    /// Generates index data for a face whose first vertex is at `base_vertex`.
    ///
    /// # Returns
    /// Two triangles (6 indices total).
    pub fn indices(base_vertex: u32) -> [u32; 6] {
        [
            base_vertex,
            base_vertex + 1,
            base_vertex + 2,
            base_vertex,
            base_vertex + 2,
            base_vertex + 3,
        ]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn top_face_sits_above_block() {
        let face = Face::new(Point3::new(2, 5, 7), BlockType::STONE, BlockSide::TOP);
        for vertex in face.vertices() {
            assert_relative_eq!(vertex.position[1], 6.0);
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn grass_top_samples_first_atlas_tile() {
        let face = Face::new(Point3::new(0, 0, 0), BlockType::GRASS, BlockSide::TOP);
        let [a, b, c, d] = face.vertices().map(|v| v.tex_coords);
        assert_eq!(a, [0.0, 1.0 / 16.0]);
        assert_eq!(b, [1.0 / 16.0, 1.0 / 16.0]);
        assert_eq!(c, [1.0 / 16.0, 0.0]);
        assert_eq!(d, [0.0, 0.0]);
    }

    #[test]
    fn indices_offset_by_base() {
        assert_eq!(Face::indices(8), [8, 9, 10, 8, 10, 11]);
    }
}
