//! Rendering system for the voxel engine.
//!
//! This module turns chunk block data into meshes and defines the seam a
//! frame is drawn through. The engine builds a [`Frame`] at the end of every
//! tick and hands it to a [`Renderer`].
//!
//! Two renderers ship with the engine:
//! - [`PipelineManager`] draws into a window with wgpu
//! - [`LogRenderer`] only logs mesh statistics, for headless runs and tests

use cgmath::{Matrix4, Point3};

use super::voxels::world::World;

mod bind_group_state;
pub mod meshing;
mod outline;
mod pipeline_manager;
mod texture;
mod vertex;

// Re-export commonly used types
pub use pipeline_manager::PipelineManager;
pub use vertex::Vertex;

/// Everything needed to draw one frame.
pub struct Frame<'a> {
    /// The position the scene is viewed from
    pub view_position: Point3<f32>,
    /// World to view space transform
    pub view_matrix: Matrix4<f32>,
    /// Meshes to draw are read from the world's chunks
    pub world: &'a World,
    /// Block under the crosshair, drawn with an outline
    pub highlight: Option<Point3<i32>>,
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);

    /// Called when the output surface changes size, in physical pixels.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Renderer that only reports what it would draw.
///
/// Mesh totals are logged at info level whenever they change, so a session
/// shows one line per edit rather than one per frame.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    last_totals: Option<MeshTotals>,
}

/// Aggregate mesh statistics of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshTotals {
    pub chunks: usize,
    pub faces: usize,
    pub triangles: usize,
}

impl MeshTotals {
    pub fn of(world: &World) -> Self {
        world
            .chunks()
            .filter_map(|chunk| chunk.mesh())
            .fold(MeshTotals::default(), |totals, mesh| MeshTotals {
                chunks: totals.chunks + 1,
                faces: totals.faces + mesh.face_count(),
                triangles: totals.triangles + mesh.triangle_count(),
            })
    }
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames += 1;

        let totals = MeshTotals::of(frame.world);
        if self.last_totals != Some(totals) {
            log::info!(
                "Drawing {} chunk meshes: {} faces, {} triangles",
                totals.chunks,
                totals.faces,
                totals.triangles
            );
            self.last_totals = Some(totals);
        }

        if let Some(block) = frame.highlight {
            log::trace!("Highlighting block at {:?}", block);
        }
    }
}
