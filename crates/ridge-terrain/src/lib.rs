//! Ridge Terrain - Procedural heightfield generation
//!
//! Provides a seeded noise field, octave-stacked height and normal sampling,
//! and the per-frame grid mesh that follows the viewer. Does not depend on
//! ridge-render; outputs raw vertex data (positions, normals, indices) for
//! the renderer to consume.

mod field;
mod mesh;
mod sampler;
mod stream;

pub use field::NoiseField;
pub use mesh::{generate, TerrainGrid, TerrainVertex};
pub use sampler::{HeightSample, HeightSampler};
pub use stream::TerrainStream;
