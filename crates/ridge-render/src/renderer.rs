//! Terrain frame renderer
//!
//! Owns the pipeline, the uniform buffer, and the persistent mesh buffers,
//! and records one render pass per frame: clear to sky, draw the terrain.

use crate::camera::{FlyCamera, Projection};
use crate::context::{RenderContext, RenderError};
use crate::mesh_buffer::TerrainMeshBuffer;
use crate::terrain_pipeline::{TerrainPipeline, TerrainUniforms};
use ridge_core::{Color, Vec3};
use ridge_terrain::TerrainGrid;
use wgpu::util::DeviceExt;

/// Settings the renderer reads every frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSettings {
    pub sky_color: Color,
    /// Light position relative to the camera
    pub light_offset: Vec3,
    pub shading: bool,
}

pub struct TerrainRenderer {
    pipeline: TerrainPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    mesh: TerrainMeshBuffer,
}

impl TerrainRenderer {
    /// `grid_width` x `grid_depth` pre-sizes the mesh buffers so steady-state
    /// frames never reallocate.
    pub fn new(context: &RenderContext, grid_width: u32, grid_depth: u32) -> Self {
        let device = &context.device;
        let pipeline = TerrainPipeline::new(device, context.config.format);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Uniform Buffer"),
            contents: bytemuck::bytes_of(&TerrainUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Terrain Uniform Bind Group"),
            layout: &pipeline.uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let mesh = TerrainMeshBuffer::for_grid_size(device, grid_width, grid_depth);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            mesh,
        }
    }

    /// Refill the mesh buffers with this frame's grid
    pub fn upload_grid(&mut self, context: &RenderContext, grid: &TerrainGrid) {
        self.mesh.upload(&context.device, &context.queue, grid);
    }

    pub fn index_count(&self) -> u32 {
        self.mesh.index_count()
    }

    /// Draw the uploaded terrain into `target`
    pub fn render(
        &self,
        context: &RenderContext,
        camera: &FlyCamera,
        projection: &Projection,
        settings: &FrameSettings,
        target: &wgpu::TextureView,
    ) -> Result<(), RenderError> {
        let light_pos = camera.position() + settings.light_offset;
        let uniforms = TerrainUniforms::new(
            camera.view_matrix(),
            projection.matrix(),
            light_pos.to_array(),
            settings.shading,
        );
        context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Terrain Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Terrain Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: settings.sky_color.r as f64,
                            g: settings.sky_color.g as f64,
                            b: settings.sky_color.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            self.mesh.draw(&mut pass);
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}
