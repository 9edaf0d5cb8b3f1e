//! Follow camera with user orbit offsets.
//!
//! Two layers of smoothing: drag/scroll targets are chased by the offset
//! state, and the resulting desired position is chased again by the camera
//! position. The camera always looks near the island center rather than at
//! the traveler, which keeps the whole diorama in frame.

use engine_core::{damp_vec3, lerp, Quat, Vec2, Vec3};
use renderer::Camera;

/// Yaw radians per pixel of horizontal drag.
const DRAG_YAW_RATE: f32 = -0.0045;
/// Pitch radians per pixel of vertical drag.
const DRAG_PITCH_RATE: f32 = -0.004;
/// Distance change per pixel of scroll.
const SCROLL_RATE: f32 = 0.012;

const PITCH_MIN: f32 = -0.05;
const PITCH_MAX: f32 = 0.62;
const DISTANCE_MIN: f32 = 14.0;
const DISTANCE_MAX: f32 = 36.0;

/// Fixed point the camera aims toward.
const LOOK_TARGET: Vec3 = Vec3::new(0.0, 1.6, 0.0);

#[derive(Debug, Clone)]
pub struct FollowCamera {
    yaw_target: f32,
    pitch_target: f32,
    distance_target: f32,

    yaw: f32,
    pitch: f32,
    distance: f32,

    position: Vec3,
    target: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            yaw_target: 0.0,
            pitch_target: 0.18,
            distance_target: 22.0,
            yaw: 0.0,
            pitch: 0.18,
            distance: 22.0,
            position: Vec3::new(0.0, 9.0, 22.0),
            target: Vec3::new(0.0, 2.0, 0.0),
        }
    }
}

impl FollowCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a mouse drag in pixels to the orbit offset targets.
    pub fn apply_drag(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw_target += delta.x * DRAG_YAW_RATE * sensitivity;
        self.pitch_target += delta.y * DRAG_PITCH_RATE * sensitivity;
    }

    /// Apply scroll in pixel units to the distance target.
    pub fn apply_scroll(&mut self, pixels: f32) {
        self.distance_target += pixels * SCROLL_RATE;
    }

    /// Advance the camera toward the traveler for this frame. `t` drives the
    /// lateral sway.
    pub fn update(&mut self, traveler_pos: Vec3, traveler_forward: Vec3, t: f32, dt: f32) {
        self.pitch_target = self.pitch_target.clamp(PITCH_MIN, PITCH_MAX);
        self.distance_target = self.distance_target.clamp(DISTANCE_MIN, DISTANCE_MAX);

        let offset_damp = (1.0 - 0.001f32.powf(dt)) * 0.85;
        self.yaw = lerp(self.yaw, self.yaw_target, offset_damp);
        self.pitch = lerp(self.pitch, self.pitch_target, offset_damp);
        self.distance = lerp(self.distance, self.distance_target, offset_damp);

        let behind = -traveler_forward;
        let right = Vec3::Y.cross(behind).normalize_or_zero();
        let dir = (Quat::from_axis_angle(Vec3::Y, self.yaw) * behind).normalize_or_zero();

        let up_lift = 0.40 + self.pitch.sin() * 0.65;
        let sway = 0.12 * (t * 1.1).sin();

        let desired_pos = traveler_pos
            + dir * self.distance
            + Vec3::Y * (up_lift * self.distance * 0.55)
            + right * sway;

        let cam_damp_rate = 0.0005;
        self.position = damp_vec3(self.position, desired_pos, cam_damp_rate, dt);
        let target_damp = 1.0 - cam_damp_rate.powf(dt);
        self.target = self.target.lerp(LOOK_TARGET, target_damp * 0.9);
    }

    /// Write this frame's smoothed pose into the render camera.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.position = self.position;
        camera.target = self.target;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_and_distance_are_clamped() {
        let mut cam = FollowCamera::new();
        cam.apply_drag(Vec2::new(0.0, -10_000.0), 1.0);
        cam.apply_scroll(100_000.0);
        cam.update(Vec3::new(18.8, 5.8, 0.0), Vec3::Z, 0.0, 1.0 / 60.0);
        assert!(cam.pitch_target <= PITCH_MAX);
        assert!(cam.distance_target <= DISTANCE_MAX);

        cam.apply_drag(Vec2::new(0.0, 10_000.0), 1.0);
        cam.apply_scroll(-100_000.0);
        cam.update(Vec3::new(18.8, 5.8, 0.0), Vec3::Z, 0.0, 1.0 / 60.0);
        assert!(cam.pitch_target >= PITCH_MIN);
        assert!(cam.distance_target >= DISTANCE_MIN);
    }

    #[test]
    fn drag_yaw_is_unbounded() {
        let mut cam = FollowCamera::new();
        cam.apply_drag(Vec2::new(-5000.0, 0.0), 1.0);
        assert!(cam.yaw_target > 6.28);
    }

    #[test]
    fn camera_settles_behind_the_traveler() {
        let mut cam = FollowCamera::new();
        let pos = Vec3::new(18.8, 5.8, 0.0);
        let forward = Vec3::new(0.0, 0.0, 1.0);
        for _ in 0..600 {
            cam.update(pos, forward, 0.0, 1.0 / 60.0);
        }
        // Behind means opposite the forward axis.
        assert!(cam.position.z < pos.z);
        let dist = cam.position.distance(pos);
        assert!(dist > DISTANCE_MIN && dist < DISTANCE_MAX * 1.6);
        // Look target converges on the island center anchor.
        assert!(cam.target.distance(LOOK_TARGET) < 0.01);
    }

    #[test]
    fn sensitivity_scales_drag() {
        let mut a = FollowCamera::new();
        let mut b = FollowCamera::new();
        a.apply_drag(Vec2::new(100.0, 0.0), 1.0);
        b.apply_drag(Vec2::new(100.0, 0.0), 2.0);
        assert!((b.yaw_target - 2.0 * a.yaw_target).abs() < 1e-6);
    }
}
