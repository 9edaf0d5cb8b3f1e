//! Compass overlay: a ring with four zone ticks and a smoothed needle that
//! tracks the traveler's orbit angle.

use crate::zone::Zone;
use engine_core::{shortest_delta, Vec2};
use renderer::OverlayVertex;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Compass center in NDC.
const CENTER: Vec2 = Vec2::new(-0.78, 0.70);
/// Outer ring radius in NDC (vertical units; x is aspect-corrected).
const RADIUS: f32 = 0.16;

const RING_COLOR: [f32; 4] = [0.08, 0.10, 0.14, 0.85];
const NEEDLE_COLOR: [f32; 4] = [1.0, 0.96, 0.88, 0.95];
const INACTIVE_DIM: f32 = 0.35;

pub struct Compass {
    needle_angle: f32,
}

impl Compass {
    pub fn new() -> Self {
        Self { needle_angle: 0.0 }
    }

    /// Ease the needle toward the orbit angle along the shortest arc.
    pub fn update(&mut self, theta_wrapped: f32, dt: f32) {
        let diff = shortest_delta(self.needle_angle, theta_wrapped);
        let damp = 1.0 - 0.001f32.powf(dt);
        self.needle_angle += diff * damp * 0.9;
    }

    pub fn needle_angle(&self) -> f32 {
        self.needle_angle
    }

    /// Emit the overlay geometry for this frame.
    pub fn build_overlay(
        &self,
        active: Zone,
        aspect: f32,
        vertices: &mut Vec<OverlayVertex>,
        indices: &mut Vec<u32>,
    ) {
        let builder = OverlayBuilder {
            aspect,
            vertices,
            indices,
        };
        self.build_into(active, builder);
    }

    fn build_into(&self, active: Zone, mut b: OverlayBuilder) {
        // Ring backdrop.
        b.ring(CENTER, RADIUS * 0.82, RADIUS, 40, RING_COLOR);

        // One tick per zone at its quadrant center, the active one at full
        // brightness.
        for zone in Zone::ALL {
            let angle = zone.index() as f32 * FRAC_PI_2;
            let mut color = zone.accent_color();
            if zone != active {
                for c in color.iter_mut().take(3) {
                    *c *= INACTIVE_DIM;
                }
            }
            let dir = Vec2::new(angle.cos(), angle.sin());
            let tip = CENTER + b.scale(dir * RADIUS * 1.12);
            let base = CENTER + b.scale(dir * RADIUS * 0.88);
            let side = b.scale(Vec2::new(-dir.y, dir.x) * RADIUS * 0.10);
            b.triangle(tip, base + side, base - side, color);
        }

        // Needle.
        let dir = Vec2::new(self.needle_angle.cos(), self.needle_angle.sin());
        let tip = CENTER + b.scale(dir * RADIUS * 0.78);
        let tail = CENTER - b.scale(dir * RADIUS * 0.22);
        let side = b.scale(Vec2::new(-dir.y, dir.x) * RADIUS * 0.06);
        b.triangle(tip, tail + side, tail - side, NEEDLE_COLOR);
    }
}

/// Appends aspect-corrected 2D primitives to the frame's overlay buffers.
struct OverlayBuilder<'a> {
    aspect: f32,
    vertices: &'a mut Vec<OverlayVertex>,
    indices: &'a mut Vec<u32>,
}

impl OverlayBuilder<'_> {
    /// Shrink x so circles stay round on wide windows.
    fn scale(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x / self.aspect, v.y)
    }

    fn push(&mut self, p: Vec2, color: [f32; 4]) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(OverlayVertex::new([p.x, p.y], color));
        i
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        let ia = self.push(a, color);
        let ib = self.push(b, color);
        let ic = self.push(c, color);
        self.indices.extend([ia, ib, ic]);
    }

    fn ring(&mut self, center: Vec2, inner: f32, outer: f32, segments: u32, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for i in 0..=segments {
            let a = i as f32 / segments as f32 * TAU;
            let dir = Vec2::new(a.cos(), a.sin());
            let pi = center + self.scale(dir * inner);
            let po = center + self.scale(dir * outer);
            self.push(pi, color);
            self.push(po, color);
        }
        for i in 0..segments {
            let o = base + i * 2;
            self.indices.extend([o, o + 1, o + 2, o + 2, o + 1, o + 3]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn needle_takes_the_short_way_around() {
        let mut compass = Compass::new();
        compass.needle_angle = 0.1;
        // Target just below a full turn: shortest path is backwards through 0.
        compass.update(TAU - 0.1, 1.0 / 60.0);
        assert!(compass.needle_angle < 0.1);
    }

    #[test]
    fn needle_converges() {
        let mut compass = Compass::new();
        for _ in 0..600 {
            compass.update(PI, 1.0 / 60.0);
        }
        assert!((compass.needle_angle - PI).abs() < 0.01);
    }

    #[test]
    fn overlay_geometry_is_consistent() {
        let compass = Compass::new();
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        compass.build_overlay(Zone::Water, 16.0 / 9.0, &mut vertices, &mut indices);

        assert!(!vertices.is_empty());
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        // Everything stays in the top-left region of NDC.
        assert!(vertices.iter().all(|v| v.position[0] < 0.0 && v.position[1] > 0.0));
    }
}
