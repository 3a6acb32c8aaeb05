//! Camera-following terrain window
//!
//! The whole window is regenerated from scratch every frame; the previous
//! grid is dropped rather than diffed.

use crate::mesh::{generate, TerrainGrid};
use crate::sampler::HeightSampler;
use log::debug;
use ridge_core::{OriginMode, Result, RidgeError, Vec2, Vec3, ViewerConfig};

/// Regenerates the visible terrain around the viewer each frame
pub struct TerrainStream {
    sampler: HeightSampler,
    width: u32,
    depth: u32,
    mode: OriginMode,
    grid: Option<TerrainGrid>,
    last_origin: Option<Vec2>,
}

impl TerrainStream {
    pub fn new(sampler: HeightSampler, width: u32, depth: u32, mode: OriginMode) -> Result<Self> {
        if width < 2 || depth < 2 {
            return Err(RidgeError::InvalidGridSize { width, depth });
        }
        Ok(Self {
            sampler,
            width,
            depth,
            mode,
            grid: None,
            last_origin: None,
        })
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        Self::new(
            HeightSampler::from_config(&config.noise)?,
            config.terrain.grid_width,
            config.terrain.grid_depth,
            config.terrain.origin_mode,
        )
    }

    pub fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }

    pub fn mode(&self) -> OriginMode {
        self.mode
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.depth)
    }

    /// The most recently generated grid
    pub fn grid(&self) -> Option<&TerrainGrid> {
        self.grid.as_ref()
    }

    /// Window origin for a camera position.
    ///
    /// `Truncated` drops the fractional part toward zero, so the window only
    /// moves in whole-unit steps and `-0.5` and `0.5` share origin `0`.
    pub fn window_origin(&self, camera_position: Vec3) -> Vec2 {
        let ground = Vec2::from_xz(camera_position);
        match self.mode {
            OriginMode::Truncated => ground.trunc(),
            OriginMode::Continuous => ground,
        }
    }

    /// Regenerate the window around `camera_position`.
    pub fn update(&mut self, camera_position: Vec3) -> Result<&TerrainGrid> {
        let origin = self.window_origin(camera_position);

        if self.last_origin != Some(origin) && self.mode == OriginMode::Truncated {
            debug!("terrain window recentred at ({}, {})", origin.x, origin.y);
        }
        self.last_origin = Some(origin);

        let grid = generate(&self.sampler, origin, self.width, self.depth)?;
        Ok(self.grid.insert(grid))
    }
}
