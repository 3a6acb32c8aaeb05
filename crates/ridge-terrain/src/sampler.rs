//! Octave-stacked height and surface normals

use crate::field::NoiseField;
use ridge_core::config::NoiseConfig;
use ridge_core::{Result, RidgeError, Vec3};

/// Height and unit normal at one ground-plane point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    pub height: f32,
    pub normal: Vec3,
}

/// Fractal (fBm) height function built from a [`NoiseField`].
///
/// Octave `k` contributes `base_amplitude / 2^k * noise(x * 2^k, z * 2^k)`.
#[derive(Clone)]
pub struct HeightSampler {
    noise: NoiseField,
    octave_count: u32,
    base_amplitude: f32,
    epsilon: f32,
}

impl HeightSampler {
    /// `epsilon` is the finite-difference half-step used for normals and
    /// must be positive; a zero step yields degenerate normals.
    pub fn new(
        noise: NoiseField,
        octave_count: u32,
        base_amplitude: f32,
        epsilon: f32,
    ) -> Result<Self> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(RidgeError::InvalidParameter {
                name: "epsilon",
                value: epsilon as f64,
                reason: "must be positive",
            });
        }
        Ok(Self {
            noise,
            octave_count,
            base_amplitude,
            epsilon,
        })
    }

    pub fn from_config(config: &NoiseConfig) -> Result<Self> {
        Self::new(
            NoiseField::from_config(config)?,
            config.octave_count,
            config.base_amplitude,
            config.normal_epsilon,
        )
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn octave_count(&self) -> u32 {
        self.octave_count
    }

    /// Terrain height at world (x, z)
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = self.base_amplitude;
        let mut frequency = 1.0;

        for _ in 0..self.octave_count {
            total += amplitude * self.noise.sample(x * frequency, z * frequency);
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        total
    }

    /// Surface normal at world (x, z) from central differences.
    pub fn normal(&self, x: f32, z: f32) -> Vec3 {
        let eps = self.epsilon;

        let h_left = self.height(x - eps, z);
        let h_right = self.height(x + eps, z);
        let h_back = self.height(x, z - eps);
        let h_front = self.height(x, z + eps);

        let tangent_x = Vec3::new(2.0 * eps, h_right - h_left, 0.0);
        let tangent_z = Vec3::new(0.0, h_front - h_back, 2.0 * eps);

        // tz x tx points to +Y for a flat surface
        tangent_z.cross(&tangent_x).normalized()
    }

    pub fn sample(&self, x: f32, z: f32) -> HeightSample {
        HeightSample {
            height: self.height(x, z),
            normal: self.normal(x, z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridge_core::FractalKind;

    fn sampler(octaves: u32) -> HeightSampler {
        let noise = NoiseField::new(1337, 0.01, FractalKind::Plain).unwrap();
        HeightSampler::new(noise, octaves, 20.0, 0.1).unwrap()
    }

    #[test]
    fn zero_octaves_is_flat_at_zero() {
        let s = sampler(0);
        assert_eq!(s.height(0.0, 0.0), 0.0);
        assert_eq!(s.height(123.4, -56.7), 0.0);
    }

    #[test]
    fn flat_terrain_normal_points_up() {
        let n = sampler(0).normal(5.0, -3.0);
        assert!(n.x.abs() < 1e-6);
        assert!((n.y - 1.0).abs() < 1e-6);
        assert!(n.z.abs() < 1e-6);
    }

    #[test]
    fn normals_are_unit_length_and_upward() {
        let s = sampler(4);
        for i in 0..30 {
            for j in 0..30 {
                let (x, z) = (i as f32 * 3.7 - 50.0, j as f32 * 4.3 - 60.0);
                let n = s.normal(x, z);
                assert!((n.length() - 1.0).abs() < 1e-4, "|n| = {} at ({x}, {z})", n.length());
                assert!(n.y > 0.0);
            }
        }
    }

    #[test]
    fn normal_leans_away_from_rising_slope() {
        // Height increasing along +x must tilt the normal toward -x
        let s = sampler(4);
        let (mut found, mut x) = (false, -200.0);
        while x < 200.0 && !found {
            let slope = s.height(x + 0.1, 7.0) - s.height(x - 0.1, 7.0);
            if slope > 0.01 {
                assert!(s.normal(x, 7.0).x < 0.0);
                found = true;
            }
            x += 1.3;
        }
        assert!(found, "no rising slope found along the probe line");
    }

    #[test]
    fn single_octave_is_scaled_noise() {
        let s = sampler(1);
        let expected = 20.0 * s.noise().sample(17.0, 4.0);
        assert!((s.height(17.0, 4.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn octaves_halve_amplitude_and_double_frequency() {
        let s = sampler(2);
        let n = s.noise();
        let expected = 20.0 * n.sample(11.0, 3.0) + 10.0 * n.sample(22.0, 6.0);
        assert!((s.height(11.0, 3.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn sample_matches_parts() {
        let s = sampler(3);
        let hs = s.sample(8.0, 9.0);
        assert_eq!(hs.height, s.height(8.0, 9.0));
        assert_eq!(hs.normal, s.normal(8.0, 9.0));
    }

    #[test]
    fn rejects_zero_epsilon() {
        let noise = NoiseField::new(1, 0.01, FractalKind::Plain).unwrap();
        assert!(HeightSampler::new(noise.clone(), 4, 20.0, 0.0).is_err());
        assert!(HeightSampler::new(noise, 4, 20.0, -1.0).is_err());
    }
}
