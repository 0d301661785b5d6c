//! Mesh generation for voxel rendering.
//!
//! This module converts a chunk's block array into a GPU-friendly mesh with
//! per-face visibility culling: each solid block contributes one textured quad
//! per face that borders air or the edge of the chunk.
//!
//! # Architecture
//! - [`ChunkMesh`]: vertices and indices of one chunk, placed at the chunk origin
//! - [`Face`]: a single block face and the quad it produces
//! - [`MeshingRenderer`]: mirrors chunk meshes into GPU buffers and draws them
//!
//! # Usage
//! ```
//! use voxel_sandbox::{BlockType, Chunk, ChunkMesh, ChunkPosition};
//!
//! let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
//! chunk.set_block(4, 4, 4, BlockType::STONE);
//! let mesh = ChunkMesh::build(&chunk);
//! assert_eq!(mesh.face_count(), 6);
//! ```

mod face;
mod mesh;
mod renderer;

pub use face::Face;
pub use mesh::ChunkMesh;
pub use renderer::{plan_sync, MeshingRenderer, SyncPlan};
