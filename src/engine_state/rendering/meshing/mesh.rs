//! Chunk mesh data and construction.
//!
//! A chunk mesh holds one quad per visible block face. A face is visible when
//! the cell it looks at is air or outside the chunk; see
//! [`Chunk::is_face_visible`].

use cgmath::Point3;

use super::face::Face;
use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE},
};

/// Renderable surface of one chunk.
#[derive(Debug, Clone)]
pub struct ChunkMesh {
    /// World position of the chunk's minimum corner. Vertex positions are relative to it.
    pub origin: Point3<i32>,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates an empty mesh placed at `origin`.
    pub fn new(origin: Point3<i32>) -> Self {
        ChunkMesh {
            origin,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Builds the mesh of every visible face in `chunk`.
    pub fn build(chunk: &Chunk) -> Self {
        let mut mesh = ChunkMesh::new(chunk.position().world_origin());

        for y in 0..CHUNK_HEIGHT {
            for z in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let block_type = chunk.get_block(x, y, z);
                    if !block_type.is_solid() {
                        continue;
                    }

                    for side in BlockSide::all() {
                        if chunk.is_face_visible(x, y, z, side) {
                            mesh.push_face(&Face::new(Point3::new(x, y, z), block_type, side));
                        }
                    }
                }
            }
        }

        mesh
    }

    /// Appends a face's vertices and indices.
    pub fn push_face(&mut self, face: &Face) {
        let base_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices.extend_from_slice(&Face::indices(base_vertex));
    }

    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices moved from chunk space into world space, ready for upload.
    pub fn world_vertices(&self) -> Vec<Vertex> {
        let offset = [
            self.origin.x as f32,
            self.origin.y as f32,
            self.origin.z as f32,
        ];
        self.vertices
            .iter()
            .map(|vertex| {
                let [x, y, z] = vertex.position;
                Vertex {
                    position: [x + offset[0], y + offset[1], z + offset[2]],
                    ..*vertex
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{block::block_type::BlockType, chunk::ChunkPosition};

    #[test]
    fn isolated_block_has_six_faces() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        chunk.set_block(7, 30, 7, BlockType::STONE);
        let mesh = ChunkMesh::build(&chunk);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn shared_faces_are_culled() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        chunk.set_block(7, 30, 7, BlockType::STONE);
        chunk.set_block(8, 30, 7, BlockType::DIRT);
        assert_eq!(ChunkMesh::build(&chunk).face_count(), 10);
    }

    #[test]
    fn faces_on_chunk_boundary_are_kept() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        chunk.set_block(0, 0, 0, BlockType::STONE);
        assert_eq!(ChunkMesh::build(&chunk).face_count(), 6);
    }

    #[test]
    fn full_chunk_only_shows_its_hull() {
        let chunk = Chunk::from_blocks(
            ChunkPosition::new(0, 0),
            vec![BlockType::STONE; crate::engine_state::voxels::chunk::CHUNK_VOLUME],
        )
        .unwrap();
        let size = CHUNK_SIZE as usize;
        let height = CHUNK_HEIGHT as usize;
        let hull = 2 * size * size + 4 * size * height;
        assert_eq!(ChunkMesh::build(&chunk).face_count(), hull);
    }

    #[test]
    fn indices_reference_their_own_vertices() {
        let mut chunk = Chunk::empty(ChunkPosition::new(3, -2));
        chunk.set_block(1, 1, 1, BlockType::WOOD);
        chunk.set_block(1, 2, 1, BlockType::LEAVES);
        let mesh = ChunkMesh::build(&chunk);
        assert_eq!(mesh.origin, Point3::new(48, 0, -32));
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn world_vertices_are_offset_by_chunk_origin() {
        let mut chunk = Chunk::empty(ChunkPosition::new(-1, 2));
        chunk.set_block(0, 5, 0, BlockType::STONE);
        let mesh = ChunkMesh::build(&chunk);
        let world = mesh.world_vertices();
        assert_eq!(world.len(), mesh.vertices.len());
        for (local, placed) in mesh.vertices.iter().zip(&world) {
            assert_eq!(placed.position[0], local.position[0] - 16.0);
            assert_eq!(placed.position[1], local.position[1]);
            assert_eq!(placed.position[2], local.position[2] + 32.0);
            assert_eq!(placed.tex_coords, local.tex_coords);
        }
    }

    #[test]
    fn empty_chunk_has_empty_mesh() {
        assert!(ChunkMesh::build(&Chunk::empty(ChunkPosition::new(0, 0))).is_empty());
    }
}
