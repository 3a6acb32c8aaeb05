//! Coherent noise over the ground plane

use ::noise::{NoiseFn, Perlin};
use ridge_core::config::NoiseConfig;
use ridge_core::{FractalKind, Result, RidgeError};

/// A deterministic scalar field over world (x, z).
///
/// Wraps seeded Perlin noise with a base frequency and a fractal fold.
/// Holds no mutable state after construction, so overlapping windows
/// generated on different frames sample identical values.
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
    frequency: f64,
    fractal: FractalKind,
}

impl NoiseField {
    pub fn new(seed: u32, frequency: f32, fractal: FractalKind) -> Result<Self> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(RidgeError::InvalidParameter {
                name: "frequency",
                value: frequency as f64,
                reason: "must be positive",
            });
        }
        Ok(Self {
            perlin: Perlin::new(seed),
            seed,
            frequency: frequency as f64,
            fractal,
        })
    }

    pub fn from_config(config: &NoiseConfig) -> Result<Self> {
        Self::new(config.seed, config.base_frequency, config.fractal)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn fractal(&self) -> FractalKind {
        self.fractal
    }

    /// Sample the field at world (x, z). Result lies in [-1, 1].
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let raw = self
            .perlin
            .get([x as f64 * self.frequency, z as f64 * self.frequency])
            .clamp(-1.0, 1.0);

        let folded = match self.fractal {
            FractalKind::Plain => raw,
            FractalKind::Ridged => 1.0 - 2.0 * raw.abs(),
        };
        folded as f32
    }
}
