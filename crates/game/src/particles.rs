//! Ambient particle fields: island-wide wind motes plus one field per
//! elemental quarter.
//!
//! Particles drift with a fixed velocity, wrap horizontally at the field
//! bound, and reseed vertically outside their band so the fields never
//! empty out.

use crate::zone::Zone;
use engine_core::Vec3;
use rand::Rng;
use renderer::ParticleInstance;

const PARTICLE_ALPHA: f32 = 0.35;
/// Velocity is authored in units per decisecond.
const VELOCITY_SCALE: f32 = 10.0;

/// Static parameters for one particle field.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub count: usize,
    pub color: [f32; 3],
    pub size: f32,
    /// Half-extent of the spawn area on x and z.
    pub area: f32,
    pub y_min: f32,
    pub y_max: f32,
    /// Horizontal wrap bound (may exceed the spawn area).
    pub bound: f32,
    /// World-space offset of the whole field.
    pub offset: Vec3,
}

/// Island-wide white wind motes.
pub fn wind_field() -> FieldConfig {
    FieldConfig {
        count: 900,
        color: [1.0, 1.0, 1.0],
        size: 0.045,
        area: 50.0,
        y_min: 3.0,
        y_max: 22.0,
        bound: 26.0,
        offset: Vec3::ZERO,
    }
}

/// Quarter-local field hovering over a zone's landmark cluster.
pub fn zone_field(zone: Zone) -> FieldConfig {
    let c = zone.quarter_center();
    // Field anchors sit slightly outside the landmark centers.
    let offset = Vec3::new(c.x.signum() * 7.0, 0.0, c.y.signum() * 7.0);
    match zone {
        Zone::Earth => FieldConfig {
            count: 520,
            color: [0.81, 0.91, 0.72],
            size: 0.045,
            area: 16.0,
            y_min: 2.0,
            y_max: 16.0,
            bound: 16.0,
            offset,
        },
        Zone::Fire => FieldConfig {
            count: 520,
            color: [1.0, 0.48, 0.09],
            size: 0.06,
            area: 16.0,
            y_min: 2.0,
            y_max: 18.0,
            bound: 16.0,
            offset,
        },
        Zone::Water => FieldConfig {
            count: 620,
            color: [0.85, 0.96, 1.0],
            size: 0.05,
            area: 16.0,
            y_min: 4.0,
            y_max: 22.0,
            bound: 16.0,
            offset,
        },
        Zone::Air => FieldConfig {
            count: 620,
            color: [1.0, 1.0, 1.0],
            size: 0.05,
            area: 16.0,
            y_min: 6.0,
            y_max: 26.0,
            bound: 16.0,
            offset,
        },
    }
}

/// A live particle field.
pub struct ParticleField {
    config: FieldConfig,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
}

impl ParticleField {
    pub fn new(config: FieldConfig, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(config.count);
        let mut velocities = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            positions.push(Vec3::new(
                rng.gen_range(-config.area..config.area),
                rng.gen_range(config.y_min..config.y_max),
                rng.gen_range(-config.area..config.area),
            ));
            velocities.push(Vec3::new(
                rng.gen_range(-0.10..0.10),
                rng.gen_range(0.02..0.12),
                rng.gen_range(-0.10..0.10),
            ));
        }
        Self {
            config,
            positions,
            velocities,
        }
    }

    /// Advance the drift, wrapping and reseeding at the field edges.
    pub fn update(&mut self, dt: f32) {
        let bound = self.config.bound;
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            *p += *v * dt * VELOCITY_SCALE;

            if p.x > bound {
                p.x = -bound;
            } else if p.x < -bound {
                p.x = bound;
            }
            if p.z > bound {
                p.z = -bound;
            } else if p.z < -bound {
                p.z = bound;
            }

            if p.y > 24.0 {
                p.y = 3.0;
            } else if p.y < 1.0 {
                p.y = 16.0;
            }
        }
    }

    /// Append this field's billboards to the frame's instance list.
    pub fn collect(&self, out: &mut Vec<ParticleInstance>) {
        let [r, g, b] = self.config.color;
        for p in &self.positions {
            let world = *p + self.config.offset;
            out.push(ParticleInstance {
                position: world.to_array(),
                size: self.config.size,
                color: [r, g, b, PARTICLE_ALPHA],
            });
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> ParticleField {
        let mut rng = StdRng::seed_from_u64(7);
        ParticleField::new(zone_field(Zone::Fire), &mut rng)
    }

    #[test]
    fn spawns_full_count_inside_band() {
        let f = field();
        assert_eq!(f.len(), 520);
        for p in &f.positions {
            assert!(p.x.abs() <= 16.0 && p.z.abs() <= 16.0);
            assert!(p.y >= 2.0 && p.y <= 18.0);
        }
    }

    #[test]
    fn horizontal_wrap_flips_to_opposite_edge() {
        let mut f = field();
        f.positions[0] = Vec3::new(15.99, 10.0, 0.0);
        f.velocities[0] = Vec3::new(0.10, 0.0, 0.0);
        // One second of drift pushes past the bound.
        f.update(1.0);
        assert!(f.positions[0].x < 0.0);
    }

    #[test]
    fn vertical_escape_reseeds_into_band() {
        let mut f = field();
        f.positions[0] = Vec3::new(0.0, 23.95, 0.0);
        f.velocities[0] = Vec3::new(0.0, 0.12, 0.0);
        f.update(0.1);
        assert_eq!(f.positions[0].y, 3.0);
    }

    #[test]
    fn collect_applies_world_offset() {
        let f = field();
        let mut out = Vec::new();
        f.collect(&mut out);
        assert_eq!(out.len(), 520);
        // Fire quarter offset is (-7, 0, 7).
        let mean_x: f32 = out.iter().map(|i| i.position[0]).sum::<f32>() / out.len() as f32;
        let mean_z: f32 = out.iter().map(|i| i.position[2]).sum::<f32>() / out.len() as f32;
        assert!((mean_x + 7.0).abs() < 2.5);
        assert!((mean_z - 7.0).abs() < 2.5);
    }
}
