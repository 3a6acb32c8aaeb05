//! Ridge Render - wgpu renderer for streamed terrain
//!
//! Provides the first-person fly camera, the wgpu device/surface context,
//! and the terrain pipeline with its persistent mesh buffers.

mod camera;
mod context;
mod mesh_buffer;
mod renderer;
mod terrain_pipeline;

pub use camera::{FlyCamera, Projection, PITCH_LIMIT};
pub use context::{RenderContext, RenderError, DEPTH_FORMAT};
pub use mesh_buffer::TerrainMeshBuffer;
pub use renderer::{FrameSettings, TerrainRenderer};
pub use terrain_pipeline::{terrain_vertex_layout, TerrainPipeline, TerrainUniforms};
