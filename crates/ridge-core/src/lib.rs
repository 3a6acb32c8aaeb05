//! Ridge Core - Foundational types for the Ridge terrain viewer
//!
//! This crate provides the types every other Ridge crate depends on:
//! - `Vec2`, `Vec3`, `Mat4` - Spatial types and column-major matrix helpers
//! - `ViewerConfig` - Session configuration loaded from TOML
//! - Error types and Result alias

pub mod config;
mod error;
mod types;

pub use config::{FractalKind, OriginMode, PointerMode, ViewerConfig};
pub use error::{Result, RidgeError};
pub use types::{mat4_mul, mat4_transform_point, Color, Mat4, Vec2, Vec3, MAT4_IDENTITY};
