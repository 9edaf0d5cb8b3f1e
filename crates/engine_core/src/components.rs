//! Components for animated decor entities.
//!
//! Decorations that move every frame carry one of these instead of an ad-hoc
//! tag: the game queries the hecs world for (Transform, component) pairs and
//! advances them from accumulated time.

/// Vertical bob: position.y drifts by `sin(frequency * t + phase) * amplitude`
/// each frame. Phase is randomized per entity so rocks don't move in lockstep.
#[derive(Debug, Clone, Copy)]
pub struct Bob {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

/// Continuous rotation at fixed rates (radians per second).
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin {
    pub yaw_rate: f32,
    pub pitch_rate: f32,
}

/// Sinusoidal scalar pulse around a base value: `base + amplitude * sin(frequency * t)`.
/// Used for the lava emissive strength and the lagoon opacity.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Pulse {
    pub fn new(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self {
            base,
            amplitude,
            frequency,
        }
    }

    /// Evaluate the pulse at accumulated time `t`.
    pub fn at(&self, t: f32) -> f32 {
        self.base + self.amplitude * (self.frequency * t).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_stays_within_band() {
        let p = Pulse::new(1.10, 0.55, 3.8);
        for i in 0..200 {
            let v = p.at(i as f32 * 0.05);
            assert!(v >= 1.10 - 0.55 - 1e-6 && v <= 1.10 + 0.55 + 1e-6);
        }
    }
}
