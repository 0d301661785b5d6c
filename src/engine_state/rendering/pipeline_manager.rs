//! Manages the WebGPU render pipeline and associated rendering resources.
//!
//! This module coordinates the rendering process for a window: it owns the
//! surface and device, the shared bind groups and the depth buffer, and
//! delegates drawing to the specialized renderers.
//!
//! # Architecture
//!
//! - `PipelineManager`: Coordinates the overall rendering process
//! - `MeshingRenderer`: Draws chunk meshes with its own pipeline
//! - `OutlineRenderer`: Draws the wireframe around the targeted block
//!
//! Both renderers share one render pass per frame: meshes first, then the
//! outline, which tests against but does not write the depth buffer.

use cgmath::Deg;
use log::{error, warn};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use super::{
    bind_group_state::BindGroupState, meshing::MeshingRenderer, outline::OutlineRenderer,
    texture::Texture, Frame, Renderer,
};
use crate::engine_state::camera_state::camera::{CameraUniform, Projection};

/// Vertical field of view.
const FOVY: Deg<f32> = Deg(70.0);
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 500.0;

/// Daytime sky, used as the clear colour.
const SKY_COLOR: wgpu::Color = wgpu::Color {
    r: 0.53,
    g: 0.81,
    b: 0.92,
    a: 1.0,
};

/// Draws frames into a window surface.
pub struct PipelineManager {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    surface_config: SurfaceConfiguration,
    /// Depth texture used for depth testing
    depth_texture: Texture,
    projection: Projection,
    camera_uniform: CameraUniform,
    /// Camera and atlas bind groups shared by both pipelines
    bind_group_state: BindGroupState,
    meshing_renderer: MeshingRenderer,
    outline_renderer: OutlineRenderer,
}

impl PipelineManager {
    /// Builds the pipelines for a configured surface.
    pub fn new(
        surface: Surface<'static>,
        device: Device,
        queue: Queue,
        surface_config: SurfaceConfiguration,
    ) -> Self {
        let bind_group_state = BindGroupState::new(&device, &queue);

        let depth_texture = Texture::create_depth_texture(&device, &surface_config, "DEPTH TEXTURE");

        let depth_stencil = Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let meshing_renderer = MeshingRenderer::new(
            &device,
            surface_config.format,
            &bind_group_state,
            depth_stencil,
        );
        let outline_renderer =
            OutlineRenderer::new(&device, surface_config.format, &bind_group_state);

        let projection = Projection::new(
            surface_config.width,
            surface_config.height,
            FOVY,
            Z_NEAR,
            Z_FAR,
        );

        Self {
            surface,
            device,
            queue,
            surface_config,
            depth_texture,
            projection,
            camera_uniform: CameraUniform::new(),
            bind_group_state,
            meshing_renderer,
            outline_renderer,
        }
    }
}

impl Renderer for PipelineManager {
    /// Uploads what changed since the last frame, then draws and presents.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    fn render(&mut self, frame: &Frame<'_>) {
        self.camera_uniform
            .update_view_proj(frame.view_matrix, &self.projection);
        self.bind_group_state
            .write_camera(&self.queue, &self.camera_uniform);
        self.meshing_renderer.sync(&self.device, frame.world);
        self.outline_renderer.update(&self.queue, frame.highlight);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(err) => {
                error!("Error getting current frame: {:?}", err);
                return;
            }
        };

        let view = output.texture.create_view(&Default::default());
        let mut encoder = self.device.create_command_encoder(&Default::default());
        {
            let depth_stencil_attachment = Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment,
                ..Default::default()
            });

            self.meshing_renderer
                .render(&mut rpass, &self.bind_group_state);
            self.outline_renderer
                .render(&mut rpass, &self.bind_group_state);
        }

        self.queue.submit([encoder.finish()]);
        output.present();
    }

    /// Reconfigures the surface and recreates the depth texture.
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            // minimized, keep the old surface until a real size arrives
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, &self.surface_config, "DEPTH TEXTURE");
        self.projection.resize(width, height);
    }
}
