//! Viewer configuration
//!
//! Every setting is static for the session. Values come from an optional
//! TOML file; anything the file leaves out falls back to the defaults below,
//! and the binary may apply a few command-line overrides on top.

use crate::error::{Result, RidgeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the terrain window follows the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMode {
    /// Window origin is the camera position truncated toward zero. The mesh
    /// jumps by one unit whenever the camera crosses an integer boundary.
    #[default]
    Truncated,
    /// Smooth-origin variant: the window slides with the camera's fractional
    /// position, so vertices are re-sampled at shifting world coordinates.
    Continuous,
}

/// Fractal combination applied to each raw noise sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalKind {
    #[default]
    Plain,
    /// Fold the absolute value into sharp crests
    Ridged,
}

/// Where mouse-look deltas come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMode {
    /// Raw device motion; works with a locked cursor
    #[default]
    Raw,
    /// Absolute cursor positions, differenced frame to frame
    Cursor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fullscreen: bool,
    /// Clear color, linear RGB in [0..1]
    pub sky_color: [f32; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "glTerrain".to_string(),
            fullscreen: false,
            sky_color: [0.0, 135.0 / 255.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Vertices along world X
    pub grid_width: u32,
    /// Vertices along world Z
    pub grid_depth: u32,
    pub origin_mode: OriginMode,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_width: 150,
            grid_depth: 150,
            origin_mode: OriginMode::Truncated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: u32,
    pub octave_count: u32,
    /// Amplitude of octave 0; octave k uses `base_amplitude / 2^k`
    pub base_amplitude: f32,
    /// Frequency applied to world coordinates before sampling
    pub base_frequency: f32,
    pub fractal: FractalKind,
    /// Finite-difference step for normals, in world units
    pub normal_epsilon: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            octave_count: 4,
            base_amplitude: 20.0,
            base_frequency: 0.01,
            fractal: FractalKind::Plain,
            normal_epsilon: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: [f32; 3],
    /// Units per second while walking
    pub move_speed: f32,
    /// Units per second while the sprint key is held
    pub sprint_speed: f32,
    /// Degrees per pixel of pointer motion
    pub mouse_sensitivity: f32,
    pub pointer_mode: PointerMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 30.0, 0.0],
            move_speed: 10.0,
            sprint_speed: 40.0,
            mouse_sensitivity: 0.1,
            pointer_mode: PointerMode::Raw,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Light position relative to the camera, re-applied every frame
    pub offset: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 200.0, 0.0],
        }
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub terrain: TerrainConfig,
    pub noise: NoiseConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub light: LightConfig,
}

impl ViewerConfig {
    /// Load and validate a config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ViewerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the generator or camera cannot work with
    pub fn validate(&self) -> Result<()> {
        let t = &self.terrain;
        if t.grid_width < 2 || t.grid_depth < 2 {
            return Err(RidgeError::InvalidGridSize {
                width: t.grid_width,
                depth: t.grid_depth,
            });
        }

        let n = &self.noise;
        positive("noise.normal_epsilon", n.normal_epsilon)?;
        positive("noise.base_frequency", n.base_frequency)?;
        if !n.base_amplitude.is_finite() {
            return Err(RidgeError::InvalidParameter {
                name: "noise.base_amplitude",
                value: n.base_amplitude as f64,
                reason: "must be finite",
            });
        }
        if n.octave_count > 24 {
            return Err(RidgeError::InvalidParameter {
                name: "noise.octave_count",
                value: n.octave_count as f64,
                reason: "at most 24 octaves",
            });
        }

        let c = &self.camera;
        positive("camera.move_speed", c.move_speed)?;
        positive("camera.sprint_speed", c.sprint_speed)?;
        positive("camera.mouse_sensitivity", c.mouse_sensitivity)?;

        let p = &self.projection;
        if !(p.fov_deg > 0.0 && p.fov_deg < 180.0) {
            return Err(RidgeError::InvalidParameter {
                name: "projection.fov_deg",
                value: p.fov_deg as f64,
                reason: "must be between 0 and 180",
            });
        }
        positive("projection.near", p.near)?;
        if p.far <= p.near {
            return Err(RidgeError::Config(format!(
                "projection.far ({}) must be greater than projection.near ({})",
                p.far, p.near
            )));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(RidgeError::Config(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RidgeError::InvalidParameter {
            name,
            value: value as f64,
            reason: "must be positive",
        })
    }
}
