//! Wireframe drawn around the targeted block.

use cgmath::Point3;
use wgpu::util::DeviceExt;

use super::{
    bind_group_state::{BindGroupState, CAMERA_BIND_GROUP},
    texture::Texture,
};

/// How far the outline sits outside the block faces, so it wins the depth test.
const OUTLINE_MARGIN: f32 = 0.002;
/// Two vertices for each of the twelve cube edges.
pub const OUTLINE_VERTEX_COUNT: usize = 24;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutlineVertex {
    pub position: [f32; 3],
}

impl OutlineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OutlineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Line list covering the edges of the block at `block`, slightly inflated.
pub fn outline_vertices(block: Point3<i32>) -> [OutlineVertex; OUTLINE_VERTEX_COUNT] {
    let min = [
        block.x as f32 - OUTLINE_MARGIN,
        block.y as f32 - OUTLINE_MARGIN,
        block.z as f32 - OUTLINE_MARGIN,
    ];
    let max = [
        block.x as f32 + 1.0 + OUTLINE_MARGIN,
        block.y as f32 + 1.0 + OUTLINE_MARGIN,
        block.z as f32 + 1.0 + OUTLINE_MARGIN,
    ];
    // Corner i takes max on axis a when bit a of i is set
    let corner = |i: usize| OutlineVertex {
        position: [
            if i & 1 == 0 { min[0] } else { max[0] },
            if i & 2 == 0 { min[1] } else { max[1] },
            if i & 4 == 0 { min[2] } else { max[2] },
        ],
    };

    let mut vertices = [OutlineVertex { position: [0.0; 3] }; OUTLINE_VERTEX_COUNT];
    let mut next = 0;
    for from in 0..8usize {
        for axis in [1, 2, 4] {
            if from & axis == 0 {
                vertices[next] = corner(from);
                vertices[next + 1] = corner(from | axis);
                next += 2;
            }
        }
    }
    vertices
}

/// Draws the block outline with its own line pipeline.
pub struct OutlineRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    visible: bool,
}

impl OutlineRenderer {
    pub fn new(
        device: &wgpu::Device,
        texture_format: wgpu::TextureFormat,
        bind_group_state: &BindGroupState,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Outline Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_state.camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Outline Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/outline.wgsl").into()),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Outline Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[OutlineVertex::desc()],
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
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Outline Vertex Buffer"),
            contents: bytemuck::cast_slice(&outline_vertices(Point3::new(0, 0, 0))),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            render_pipeline,
            vertex_buffer,
            visible: false,
        }
    }

    /// Moves the outline to `highlight`, or hides it.
    pub fn update(&mut self, queue: &wgpu::Queue, highlight: Option<Point3<i32>>) {
        self.visible = highlight.is_some();
        if let Some(block) = highlight {
            queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&outline_vertices(block)),
            );
        }
    }

    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>, bind_group_state: &BindGroupState) {
        if !self.visible {
            return;
        }
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(CAMERA_BIND_GROUP, &bind_group_state.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..OUTLINE_VERTEX_COUNT as u32, 0..1);
    }
}
