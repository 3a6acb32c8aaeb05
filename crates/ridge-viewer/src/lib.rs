//! Ridge Viewer - first-person terrain viewer library
//!
//! This crate provides the `ViewerApp` application handler that drives the
//! terrain stream, fly camera, and renderer from the winit event loop.

mod app;
pub mod controls;

pub use app::ViewerApp;
