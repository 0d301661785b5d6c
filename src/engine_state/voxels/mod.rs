//! # Voxel World
//!
//! This module contains the voxel data model: what a block is, how blocks are
//! grouped into chunks, and how the world of chunks is queried and edited.
//!
//! ## Architecture
//!
//! * **Block**: block types, block faces and their atlas textures
//! * **Chunk**: a fixed 16x64x16 array of blocks plus the terrain generator
//! * **World**: owns all chunks and maps world coordinates onto them
//! * **Raycast**: finds the block a ray points at
//! * **Snapshot**: serializable copy of the world's block data
//!
//! ## Data Flow
//!
//! 1. The world generates and meshes every chunk around the origin up front
//! 2. Reads and writes arrive in world coordinates and are routed to one chunk
//! 3. Every write rebuilds the touched meshes before returning
//!
//! Everything here runs on the engine's single thread.

pub mod block;
pub mod chunk;
pub mod raycast;
pub mod snapshot;
pub mod world;
