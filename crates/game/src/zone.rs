//! The four elemental quarters and their atmosphere presets.
//!
//! The ring is divided into quadrants of a quarter turn each. Walking the
//! ring counter-clockwise from theta 0 visits Earth, Fire, Water, Air; the
//! atmosphere cross-fades between the current quadrant and the next.

use engine_core::{smoothstep, wrap_angle, Vec2};
use procgen::sky::SkyGradient;
use std::f32::consts::{FRAC_PI_2, PI};

/// Distance of each quarter center from the island center, on both axes.
const QUARTER_OFFSET: f32 = 6.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Earth,
    Fire,
    Water,
    Air,
}

impl Zone {
    /// In ring order: the quadrant starting at `index * PI/2` along the orbit.
    pub const ALL: [Zone; 4] = [Zone::Earth, Zone::Fire, Zone::Water, Zone::Air];

    pub fn index(self) -> usize {
        match self {
            Zone::Earth => 0,
            Zone::Fire => 1,
            Zone::Water => 2,
            Zone::Air => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Earth => "Earth",
            Zone::Fire => "Fire",
            Zone::Water => "Water",
            Zone::Air => "Air",
        }
    }

    /// Landmark cluster center on the island surface (x, z).
    pub fn quarter_center(self) -> Vec2 {
        match self {
            Zone::Earth => Vec2::new(QUARTER_OFFSET, QUARTER_OFFSET),
            Zone::Fire => Vec2::new(-QUARTER_OFFSET, QUARTER_OFFSET),
            Zone::Water => Vec2::new(-QUARTER_OFFSET, -QUARTER_OFFSET),
            Zone::Air => Vec2::new(QUARTER_OFFSET, -QUARTER_OFFSET),
        }
    }

    /// Accent color used for the compass tick of this zone.
    pub fn accent_color(self) -> [f32; 4] {
        match self {
            Zone::Earth => [0.36, 0.72, 0.45, 1.0],
            Zone::Fire => [1.0, 0.42, 0.25, 1.0],
            Zone::Water => [0.40, 0.72, 1.0, 1.0],
            Zone::Air => [0.92, 0.95, 1.0, 1.0],
        }
    }

    /// Atmosphere preset for this zone.
    pub fn atmosphere(self) -> ZoneParams {
        match self {
            Zone::Earth => ZoneParams {
                fog_density: 0.020,
                fog_color: rgb(0x86c49b),
                hemi_sky: rgb(0xcff7dd),
                hemi_ground: rgb(0x0f2a1d),
                sun_color: rgb(0xffffff),
                exposure: 1.12,
                sky: SkyGradient {
                    top: rgb(0xd8fff0),
                    mid: rgb(0xaee8c9),
                    bottom: rgb(0x1a2f3a),
                },
            },
            Zone::Fire => ZoneParams {
                fog_density: 0.034,
                fog_color: rgb(0x6b2a1f),
                hemi_sky: rgb(0xffe0c2),
                hemi_ground: rgb(0x240d0a),
                sun_color: rgb(0xffe2c8),
                exposure: 1.06,
                sky: SkyGradient {
                    top: rgb(0xffd2b0),
                    mid: rgb(0xff8b6b),
                    bottom: rgb(0x1b0c14),
                },
            },
            Zone::Water => ZoneParams {
                fog_density: 0.022,
                fog_color: rgb(0x6fc6ff),
                hemi_sky: rgb(0xdaf6ff),
                hemi_ground: rgb(0x0a2040),
                sun_color: rgb(0xeaf6ff),
                exposure: 1.18,
                sky: SkyGradient {
                    top: rgb(0xe5fbff),
                    mid: rgb(0xa8ddff),
                    bottom: rgb(0x102a55),
                },
            },
            Zone::Air => ZoneParams {
                fog_density: 0.016,
                fog_color: rgb(0xaad9ff),
                hemi_sky: rgb(0xeef7ff),
                hemi_ground: rgb(0x1a2a40),
                sun_color: rgb(0xffffff),
                exposure: 1.22,
                sky: SkyGradient {
                    top: rgb(0xf3fbff),
                    mid: rgb(0xb8e6ff),
                    bottom: rgb(0x1c2a5a),
                },
            },
        }
    }
}

/// Atmosphere parameters for one zone.
#[derive(Debug, Clone)]
pub struct ZoneParams {
    pub fog_density: f32,
    pub fog_color: [f32; 3],
    pub hemi_sky: [f32; 3],
    pub hemi_ground: [f32; 3],
    pub sun_color: [f32; 3],
    pub exposure: f32,
    pub sky: SkyGradient,
}

pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Cross-fade state between the quadrant under the traveler and the next.
#[derive(Debug, Clone, Copy)]
pub struct SectorBlend {
    pub from: Zone,
    pub to: Zone,
    /// Eased blend fraction in [0, 1].
    pub t: f32,
}

/// Which quadrants the angle sits between and how far across.
pub fn sector_blend(theta: f32) -> SectorBlend {
    let a = wrap_angle(theta);
    let idx = ((a / FRAC_PI_2) as usize).min(3);
    let frac = (a - idx as f32 * FRAC_PI_2) / FRAC_PI_2;
    SectorBlend {
        from: Zone::ALL[idx],
        to: Zone::ALL[(idx + 1) % 4],
        t: smoothstep(frac),
    }
}

/// The zone whose quadrant center is closest to the angle.
pub fn nearest_zone(theta: f32) -> Zone {
    let idx = (wrap_angle(theta) / FRAC_PI_2).round() as usize % 4;
    Zone::ALL[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_order_matches_quarter_centers() {
        // The quadrant index derived from each zone's landmark center must
        // agree with the zone's position in ring order.
        for zone in Zone::ALL {
            let c = zone.quarter_center();
            let angle = wrap_angle(c.y.atan2(c.x));
            let idx = (angle / FRAC_PI_2) as usize;
            assert_eq!(idx, zone.index(), "{:?}", zone);
        }
    }

    #[test]
    fn blend_starts_and_ends_at_quadrant_edges() {
        let b = sector_blend(0.0);
        assert_eq!(b.from, Zone::Earth);
        assert_eq!(b.to, Zone::Fire);
        assert!(b.t.abs() < 1e-6);

        let b = sector_blend(FRAC_PI_2 - 1e-4);
        assert_eq!(b.from, Zone::Earth);
        assert!(b.t > 0.99);

        let b = sector_blend(FRAC_PI_2);
        assert_eq!(b.from, Zone::Fire);
        assert_eq!(b.to, Zone::Water);
    }

    #[test]
    fn blend_is_eased() {
        // Quarter of the way through a quadrant eases below linear.
        let b = sector_blend(FRAC_PI_2 * 0.25);
        assert!(b.t < 0.25);
        let b = sector_blend(FRAC_PI_2 * 0.5);
        assert!((b.t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn nearest_zone_flips_at_quadrant_midpoints() {
        assert_eq!(nearest_zone(0.0), Zone::Earth);
        assert_eq!(nearest_zone(FRAC_PI_2 * 0.49), Zone::Earth);
        assert_eq!(nearest_zone(FRAC_PI_2 * 0.51), Zone::Fire);
        assert_eq!(nearest_zone(PI), Zone::Water);
        // Just below a full turn rounds back to the first zone.
        assert_eq!(nearest_zone(2.0 * PI - 0.01), Zone::Earth);
    }

    #[test]
    fn nearest_zone_holds_until_quadrant_boundary() {
        // Approaching the Fire quadrant midpoint from either side stays Fire
        // until three quarters of the way to Water.
        let fire_mid = FRAC_PI_2;
        assert_eq!(nearest_zone(fire_mid - 0.3), Zone::Fire);
        assert_eq!(nearest_zone(fire_mid + 0.3), Zone::Fire);
        assert_eq!(nearest_zone(fire_mid + FRAC_PI_2 * 0.51), Zone::Water);
    }
}
