//! Zone-blended atmosphere: fog, hemisphere light, sun, exposure, sky.

use crate::zone::SectorBlend;
use engine_core::{lerp, Vec3};
use procgen::sky::SkyGradient;
use renderer::EnvironmentUniform;

const HEMI_INTENSITY: f32 = 0.95;
const SUN_INTENSITY: f32 = 1.35;

fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp(a[0], b[0], t),
        lerp(a[1], b[1], t),
        lerp(a[2], b[2], t),
    ]
}

/// Atmosphere values after cross-fading the two active zones.
#[derive(Debug, Clone)]
pub struct Atmosphere {
    pub uniform: EnvironmentUniform,
    /// Horizon color used as the clear color behind the dome.
    pub clear_color: [f32; 3],
}

/// Blend the two active zone presets and fold in the drifting sun.
pub fn blend_atmosphere(blend: &SectorBlend, t: f32) -> Atmosphere {
    let a = blend.from.atmosphere();
    let b = blend.to.atmosphere();
    let f = blend.t;

    let fog_color = lerp3(a.fog_color, b.fog_color, f);
    let fog_density = lerp(a.fog_density, b.fog_density, f);
    let hemi_sky = lerp3(a.hemi_sky, b.hemi_sky, f);
    let hemi_ground = lerp3(a.hemi_ground, b.hemi_ground, f);
    let sun_color = lerp3(a.sun_color, b.sun_color, f);
    let exposure = lerp(a.exposure, b.exposure, f);

    let sun_dir = sun_direction(t);

    Atmosphere {
        uniform: EnvironmentUniform {
            fog: [fog_color[0], fog_color[1], fog_color[2], fog_density],
            hemi_sky: [hemi_sky[0], hemi_sky[1], hemi_sky[2], HEMI_INTENSITY],
            hemi_ground: [hemi_ground[0], hemi_ground[1], hemi_ground[2], 0.0],
            sun_direction: [sun_dir.x, sun_dir.y, sun_dir.z, SUN_INTENSITY],
            sun_color: [sun_color[0], sun_color[1], sun_color[2], exposure],
            params: [t, 0.0, 0.0, 0.0],
        },
        clear_color: fog_color,
    }
}

/// Sky gradient for the current blend (what the dome texture is built from).
pub fn blended_sky(blend: &SectorBlend) -> SkyGradient {
    SkyGradient::blend(
        &blend.from.atmosphere().sky,
        &blend.to.atmosphere().sky,
        blend.t,
    )
}

/// Slow figure drift of the sun around its anchor.
pub fn sun_direction(t: f32) -> Vec3 {
    Vec3::new(
        18.0 + (t * 0.10).sin() * 4.0,
        26.0,
        14.0 + (t * 0.10).cos() * 4.0,
    )
    .normalize()
}

/// Debounces sky texture regeneration: redraw only when the blend has moved
/// a visible amount and at least the debounce interval has passed.
#[derive(Debug, Default)]
pub struct SkyScheduler {
    last_key: Option<(usize, usize, i32)>,
    timer: f32,
}

/// Minimum seconds between sky texture rebuilds.
const SKY_DEBOUNCE: f32 = 0.18;

impl SkyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the sky texture should be regenerated this frame.
    pub fn poll(&mut self, blend: &SectorBlend, dt: f32) -> bool {
        self.timer += dt;
        let key = (
            blend.from.index(),
            blend.to.index(),
            (blend.t * 10.0).round() as i32,
        );
        if self.timer > SKY_DEBOUNCE && self.last_key != Some(key) {
            self.last_key = Some(key);
            self.timer = 0.0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::{sector_blend, Zone};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn zero_blend_returns_the_leading_zone() {
        let blend = sector_blend(0.0);
        let atmo = blend_atmosphere(&blend, 0.0);
        let earth = Zone::Earth.atmosphere();
        assert!((atmo.uniform.fog[3] - earth.fog_density).abs() < 1e-6);
        assert!((atmo.uniform.sun_color[3] - earth.exposure).abs() < 1e-6);
        assert_eq!(atmo.clear_color, earth.fog_color);
    }

    #[test]
    fn midpoint_blend_averages_densities() {
        let blend = sector_blend(FRAC_PI_2 * 0.5);
        let atmo = blend_atmosphere(&blend, 0.0);
        let expected = (Zone::Earth.atmosphere().fog_density
            + Zone::Fire.atmosphere().fog_density)
            * 0.5;
        assert!((atmo.uniform.fog[3] - expected).abs() < 1e-4);
    }

    #[test]
    fn sun_direction_is_unit_and_drifts() {
        let a = sun_direction(0.0);
        let b = sun_direction(10.0);
        assert!((a.length() - 1.0).abs() < 1e-5);
        assert!((b.length() - 1.0).abs() < 1e-5);
        assert!(a.distance(b) > 1e-3);
    }

    #[test]
    fn scheduler_debounces_regeneration() {
        let mut sched = SkyScheduler::new();
        let blend = sector_blend(0.2);

        // Timer starts at zero; nothing fires until the debounce elapses.
        assert!(!sched.poll(&blend, 0.016));
        assert!(!sched.poll(&blend, 0.016));
        assert!(sched.poll(&blend, 0.18));

        // Same key never fires again, no matter how long passes.
        assert!(!sched.poll(&blend, 10.0));

        // A new key right after a rebuild waits out the interval first.
        let mut sched = SkyScheduler::new();
        assert!(sched.poll(&blend, 0.2));
        let moved = sector_blend(0.6);
        assert!(!sched.poll(&moved, 0.01));
        assert!(sched.poll(&moved, 0.18));
    }
}
