//! Meshing renderer module for the voxel engine.
//!
//! Chunk meshes live on the CPU inside their chunks. This renderer keeps one
//! vertex and index buffer pair per chunk on the GPU and re-uploads a chunk
//! only when its mesh revision moves past the uploaded one.
//!
//! # Architecture
//!
//! The meshing renderer is responsible for:
//! 1. Creating and managing its own render pipeline
//! 2. Mirroring chunk meshes into GPU buffers
//! 3. Issuing one indexed draw per non-empty chunk

use std::collections::HashMap;

use log::debug;
use wgpu::util::DeviceExt;

use crate::engine_state::{
    rendering::{
        bind_group_state::{BindGroupState, CAMERA_BIND_GROUP, TEXTURE_BIND_GROUP},
        Vertex,
    },
    voxels::{chunk::ChunkPosition, world::World},
};

/// GPU copy of one chunk's mesh.
struct ChunkBuffers {
    revision: u64,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Work needed to bring the uploaded meshes in line with the world.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Chunks whose current mesh has not been uploaded
    pub upload: Vec<ChunkPosition>,
    /// Uploaded chunks that are gone or have nothing left to draw
    pub evict: Vec<ChunkPosition>,
}

/// Compares uploaded revisions against the world's chunks.
pub fn plan_sync<T>(
    uploaded: &HashMap<ChunkPosition, T>,
    revision_of: impl Fn(&T) -> u64,
    world: &World,
) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for chunk in world.chunks() {
        let position = chunk.position();
        let drawable = chunk.mesh().is_some_and(|mesh| !mesh.is_empty());
        match uploaded.get(&position) {
            _ if !drawable => {
                if uploaded.contains_key(&position) {
                    plan.evict.push(position);
                }
            }
            Some(buffers) if revision_of(buffers) == chunk.mesh_revision() => {}
            _ => plan.upload.push(position),
        }
    }

    plan.evict.extend(
        uploaded
            .keys()
            .filter(|position| world.chunk(**position).is_none())
            .copied(),
    );
    plan.upload.sort();
    plan.evict.sort();
    plan
}

/// Draws chunk meshes with the block atlas.
pub struct MeshingRenderer {
    /// The WebGPU render pipeline for mesh rendering
    render_pipeline: wgpu::RenderPipeline,
    /// Uploaded meshes by chunk
    chunk_buffers: HashMap<ChunkPosition, ChunkBuffers>,
}

impl MeshingRenderer {
    /// Creates the mesh pipeline.
    ///
    /// Meshes are wound counter-clockwise seen from outside the block, so back
    /// faces are culled.
    pub fn new(
        device: &wgpu::Device,
        texture_format: wgpu::TextureFormat,
        bind_group_state: &BindGroupState,
        depth_stencil: Option<wgpu::DepthStencilState>,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Render Pipeline Layout"),
            bind_group_layouts: &[
                &bind_group_state.camera_bind_group_layout,
                &bind_group_state.texture_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/voxel.wgsl").into()),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: texture_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            chunk_buffers: HashMap::new(),
        }
    }

    /// Uploads changed meshes and frees buffers of chunks with nothing to draw.
    pub fn sync(&mut self, device: &wgpu::Device, world: &World) {
        let plan = plan_sync(&self.chunk_buffers, |buffers| buffers.revision, world);

        for position in &plan.evict {
            self.chunk_buffers.remove(position);
        }

        for position in plan.upload {
            let Some(chunk) = world.chunk(position) else {
                continue;
            };
            let Some(mesh) = chunk.mesh() else {
                continue;
            };

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Chunk Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.world_vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Chunk Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            debug!(
                "Uploaded chunk ({}, {}) revision {}: {} indices",
                position.x,
                position.z,
                chunk.mesh_revision(),
                mesh.indices.len()
            );
            self.chunk_buffers.insert(
                position,
                ChunkBuffers {
                    revision: chunk.mesh_revision(),
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh.indices.len() as u32,
                },
            );
        }
    }

    /// Draws every uploaded chunk.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>, bind_group_state: &BindGroupState) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(CAMERA_BIND_GROUP, &bind_group_state.camera_bind_group, &[]);
        render_pass.set_bind_group(TEXTURE_BIND_GROUP, &bind_group_state.texture_bind_group, &[]);

        for buffers in self.chunk_buffers.values() {
            render_pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
            render_pass.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..buffers.index_count, 0, 0..1);
        }
    }
}
