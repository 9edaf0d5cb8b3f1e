//! Traveler orbit simulation.
//!
//! Speed control is two-stage: arrow keys set a target speed which the
//! current speed chases every frame, and the angular velocity chases the
//! speed inside the 120 Hz fixed step. The double smoothing keeps direction
//! reversals free of any visible snap.

use engine_core::{damp, lerp, wrap_angle, Vec3};

/// Radius of the traveler's circular path around the island center.
pub const ORBIT_RADIUS: f32 = 18.8;
/// Base flight height above the island surface.
pub const ORBIT_HEIGHT: f32 = 5.8;

/// Speed with no key held (rad/s).
pub const CRUISE_SPEED: f32 = 0.65;
/// Speed while the forward key is held.
pub const FORWARD_SPEED: f32 = 1.10;
/// Speed while the reverse key is held.
pub const REVERSE_SPEED: f32 = -1.10;

/// Angular look-ahead used to derive the facing direction.
const LOOK_AHEAD: f32 = 0.015;
/// Roll per unit of speed when banking into the motion.
const BANK_FACTOR: f32 = 0.22;

/// Traveler position and orientation extracted from the sim for one frame.
#[derive(Debug, Clone, Copy)]
pub struct OrbitPose {
    pub position: Vec3,
    pub forward: Vec3,
    /// Signed roll around the forward axis.
    pub bank: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitSim {
    /// Unwrapped orbit angle in radians.
    theta: f32,
    /// Smoothed angular velocity, chases `speed` per fixed step.
    theta_vel: f32,
    /// Smoothed speed, chases `speed_target` per frame.
    speed: f32,
    speed_target: f32,
}

impl Default for OrbitSim {
    fn default() -> Self {
        Self {
            theta: 0.0,
            theta_vel: 0.0,
            speed: CRUISE_SPEED,
            speed_target: CRUISE_SPEED,
        }
    }
}

impl OrbitSim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map held keys to the target speed. Both or neither key falls back to
    /// cruise.
    pub fn set_input(&mut self, forward_held: bool, reverse_held: bool) {
        self.speed_target = match (forward_held, reverse_held) {
            (true, false) => FORWARD_SPEED,
            (false, true) => REVERSE_SPEED,
            _ => CRUISE_SPEED,
        };
    }

    /// Per-frame speed smoothing toward the target.
    pub fn update(&mut self, dt: f32) {
        let speed_damp = 1.0 - 0.001f32.powf(dt);
        self.speed = lerp(self.speed, self.speed_target, speed_damp * 0.85);
    }

    /// One fixed simulation step: angular velocity chases speed, then the
    /// angle integrates.
    pub fn fixed_step(&mut self, step: f32) {
        self.theta_vel = damp(self.theta_vel, self.speed, 0.0001, step);
        self.theta += self.theta_vel * step;
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn theta_wrapped(&self) -> f32 {
        wrap_angle(self.theta)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// +1.0 when traveling counter-clockwise, -1.0 clockwise. Falls back to
    /// the speed sign when the velocity is exactly zero (first frame).
    pub fn travel_sign(&self) -> f32 {
        if self.theta_vel == 0.0 {
            if self.speed >= 0.0 {
                1.0
            } else {
                -1.0
            }
        } else if self.theta_vel > 0.0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Current pose along the ring. `t` is elapsed time, which drives the
    /// vertical hover bob.
    pub fn pose(&self, t: f32) -> OrbitPose {
        let y = ORBIT_HEIGHT + (t * 2.0).sin() * 0.25;
        let position = Vec3::new(
            self.theta.cos() * ORBIT_RADIUS,
            y,
            self.theta.sin() * ORBIT_RADIUS,
        );

        let sign = self.travel_sign();
        let ahead_theta = self.theta + sign * LOOK_AHEAD;
        let ahead = Vec3::new(
            ahead_theta.cos() * ORBIT_RADIUS,
            y,
            ahead_theta.sin() * ORBIT_RADIUS,
        );
        let forward = (ahead - position).normalize_or_zero();

        let bank = self.speed.abs().clamp(0.0, 1.2) * BANK_FACTOR;
        OrbitPose {
            position,
            forward,
            bank: -bank * sign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED: f32 = 1.0 / 120.0;

    fn simulate(sim: &mut OrbitSim, seconds: f32) {
        let frames = (seconds * 120.0) as usize;
        for _ in 0..frames {
            sim.update(FIXED);
            sim.fixed_step(FIXED);
        }
    }

    #[test]
    fn cruises_forward_with_no_input() {
        let mut sim = OrbitSim::new();
        simulate(&mut sim, 2.0);
        assert!(sim.theta() > 0.5);
        // After settling, angular velocity sits near cruise.
        assert!((sim.theta_vel - CRUISE_SPEED).abs() < 0.05);
    }

    #[test]
    fn theta_increases_monotonically_under_forward_input() {
        let mut sim = OrbitSim::new();
        sim.set_input(true, false);
        let mut last = sim.theta();
        for _ in 0..120 {
            sim.update(FIXED);
            sim.fixed_step(FIXED);
            assert!(sim.theta() > last);
            last = sim.theta();
        }
        assert!(sim.speed() > CRUISE_SPEED);
    }

    #[test]
    fn reverse_input_eventually_flips_direction() {
        let mut sim = OrbitSim::new();
        simulate(&mut sim, 1.0);
        sim.set_input(false, true);
        simulate(&mut sim, 3.0);
        assert!(sim.theta_vel < 0.0);
        assert_eq!(sim.travel_sign(), -1.0);
    }

    #[test]
    fn both_keys_fall_back_to_cruise() {
        let mut sim = OrbitSim::new();
        sim.set_input(true, true);
        assert_eq!(sim.speed_target, CRUISE_SPEED);
        sim.set_input(false, false);
        assert_eq!(sim.speed_target, CRUISE_SPEED);
    }

    #[test]
    fn reversal_is_smooth_not_instant() {
        let mut sim = OrbitSim::new();
        simulate(&mut sim, 1.0);
        sim.set_input(false, true);
        // One frame later the sim is still moving forward; the reversal
        // takes visible time.
        sim.update(FIXED);
        sim.fixed_step(FIXED);
        assert!(sim.theta_vel > 0.0);
    }

    #[test]
    fn pose_stays_on_ring_and_banks_with_speed() {
        let mut sim = OrbitSim::new();
        simulate(&mut sim, 1.5);
        let pose = sim.pose(0.0);
        let radial = (pose.position.x * pose.position.x + pose.position.z * pose.position.z).sqrt();
        assert!((radial - ORBIT_RADIUS).abs() < 1e-3);
        assert!((pose.position.y - ORBIT_HEIGHT).abs() < 0.26);
        // Forward counter-clockwise travel banks negative.
        assert!(pose.bank < 0.0);
        assert!(pose.bank.abs() <= 1.2 * BANK_FACTOR + 1e-6);
        assert!(pose.forward.length() > 0.99);
    }
}
