//! Island surface heightfield.
//!
//! The island top is a displaced plane: layered Perlin noise shaped by a
//! radial falloff so the middle rolls gently and the rim stays low enough for
//! the ring road to sit flat.

use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};

/// Generates heights for the island top surface.
pub struct IslandHeightfield {
    perlin: Perlin,
    /// Vertical displacement scale.
    strength: f32,
    /// Horizontal noise frequency.
    frequency: f32,
    /// Radius at which the falloff reaches zero.
    falloff_radius: f32,
}

impl IslandHeightfield {
    pub fn new(seed: u64, strength: f32, frequency: f32, falloff_radius: f32) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self {
            perlin: Perlin::new(rng.gen()),
            strength,
            frequency,
            falloff_radius,
        }
    }

    /// Island defaults: 1.85 displacement, 0.22 frequency, 18 unit falloff.
    pub fn island(seed: u64) -> Self {
        Self::new(seed, 1.85, 0.22, 18.0)
    }

    /// Sample the surface height at a point on the island plane.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let fx = (x * self.frequency) as f64;
        let fz = (z * self.frequency) as f64;
        // Two octaves; the second breaks up the large swells.
        let n = self.perlin.get([fx, fz]) as f32 * 0.75
            + self.perlin.get([fx * 2.3 + 31.7, fz * 2.3 - 12.9]) as f32 * 0.35;

        let r = (x * x + z * z).sqrt();
        let falloff = 1.0 - (r / self.falloff_radius).clamp(0.0, 1.0);
        n * self.strength * (0.25 + 0.75 * falloff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_surface() {
        let a = IslandHeightfield::island(11);
        let b = IslandHeightfield::island(11);
        for i in 0..20 {
            let x = i as f32 * 1.7 - 17.0;
            assert_eq!(a.sample(x, -x * 0.5), b.sample(x, -x * 0.5));
        }
    }

    #[test]
    fn rim_is_flatter_than_center() {
        let field = IslandHeightfield::island(11);
        let center_amp: f32 = (0..32)
            .map(|i| field.sample((i as f32 * 0.4) - 6.0, (i as f32 * 0.3) - 5.0).abs())
            .fold(0.0, f32::max);
        let rim_amp: f32 = (0..32)
            .map(|i| {
                let a = i as f32 * 0.2;
                field.sample(a.cos() * 17.8, a.sin() * 17.8).abs()
            })
            .fold(0.0, f32::max);
        assert!(rim_amp < center_amp);
    }

    #[test]
    fn displacement_is_bounded_by_strength() {
        let field = IslandHeightfield::island(42);
        for i in 0..200 {
            let x = (i % 20) as f32 * 2.0 - 20.0;
            let z = (i / 20) as f32 * 4.0 - 20.0;
            assert!(field.sample(x, z).abs() <= 1.85 * 1.1);
        }
    }
}
