//! Authored landmark clusters for the four quarters.
//!
//! All static geometry is baked into a single mesh at build time. The lava
//! pool, the lagoon, and the Air quarter's floating rocks stay separate so
//! their per-frame animation (emissive pulse, opacity/scale breathing,
//! bobbing drift) can run through instance data.

use crate::zone::{rgb, Zone};
use engine_core::{Bob, Mat4, Quat, Spin, Transform, Vec3, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use renderer::{mesh, Mesh, MeshBuilder, Vertex};
use std::f32::consts::{PI, TAU};

/// Lava pool surface color.
pub const LAVA_COLOR: [f32; 3] = [1.0, 0.23, 0.10];
/// Lava emissive tint, scaled by the per-frame pulse.
pub const LAVA_EMISSIVE: [f32; 3] = [1.0, 0.16, 0.0];
/// Height of the lava pool inside the volcano mouth.
pub const LAVA_HEIGHT: f32 = 3.9;
/// Lagoon surface color.
pub const LAGOON_COLOR: [f32; 3] = [0.23, 0.82, 1.0];
/// Height of the lagoon above the Water quarter ground.
pub const LAGOON_HEIGHT: f32 = 0.34;

/// Marker for the Air quarter's drifting rocks.
pub struct FloatingRock;

pub struct LandmarkMeshes {
    /// All static landmark geometry across the four quarters.
    pub static_decor: Mesh,
    /// Unit-radius lava disc, positioned per frame.
    pub lava: Mesh,
    /// Unit-radius lagoon disc, positioned and scaled per frame.
    pub lagoon: Mesh,
    /// Unit-radius rock, instanced per floating-rock entity.
    pub floating_rock: Mesh,
}

pub fn lava_center() -> Vec3 {
    let c = Zone::Fire.quarter_center();
    Vec3::new(c.x, LAVA_HEIGHT, c.y)
}

pub fn lagoon_center() -> Vec3 {
    let c = Zone::Water.quarter_center();
    Vec3::new(c.x, LAGOON_HEIGHT, c.y)
}

/// Build every landmark mesh and spawn the floating-rock entities.
pub fn build_landmarks(device: &wgpu::Device, seed: u64, world: &mut World) -> LandmarkMeshes {
    let mut b = MeshBuilder::new();
    build_earth_quarter(&mut b, seed);
    build_fire_quarter(&mut b, seed);
    build_water_quarter(&mut b, seed);
    build_air_quarter(&mut b, seed, world);

    let (lava_v, lava_i) = mesh::disc(1.45, 80, 0.0, TAU, opaque(LAVA_COLOR));
    // Lagoon opacity animates through the instance tint, so bake it opaque.
    let (lagoon_v, lagoon_i) = mesh::disc(6.0, 100, 0.0, TAU, opaque(LAGOON_COLOR));
    let (rock_v, rock_i) = rock(1.0, opaque(rgb(0xd8c9a4)));

    LandmarkMeshes {
        static_decor: b.build(device),
        lava: Mesh::new(device, &lava_v, &lava_i),
        lagoon: Mesh::new(device, &lagoon_v, &lagoon_i),
        floating_rock: Mesh::new(device, &rock_v, &rock_i),
    }
}

fn opaque(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}

/// Uniform sample between two bounds given in either order.
fn range(rng: &mut StdRng, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    rng.gen_range(lo..hi)
}

fn at(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Walled city: ring wall, dense low housing, scattered trees, a green
/// central dome.
fn build_earth_quarter(b: &mut MeshBuilder, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed ^ 0xE0);
    let c = Zone::Earth.quarter_center();

    let (v, i) = mesh::torus(5.6, 0.55, 96, 18, opaque(rgb(0xcbbf86)));
    b.append(&v, &i, at(c.x, 0.95, c.y));

    let house_color = opaque(rgb(0xa89b6a));
    for _ in 0..120 {
        let w = range(&mut rng, 0.45, 1.0);
        let d = range(&mut rng, 0.45, 1.0);
        let h = range(&mut rng, 0.35, 1.2);
        let (v, i) = mesh::cuboid(w, h, d, house_color);
        let a = rng.gen_range(0.0..TAU);
        let r = range(&mut rng, 1.2, 5.0);
        let transform = Mat4::from_rotation_translation(
            Quat::from_axis_angle(Vec3::Y, rng.gen_range(0.0..PI)),
            Vec3::new(c.x + a.cos() * r, h * 0.5, c.y + a.sin() * r),
        );
        b.append(&v, &i, transform);
    }

    let trunk_color = opaque(rgb(0x3a2a1f));
    let leaf_color = opaque(rgb(0x2f8f4a));
    for _ in 0..52 {
        let a = rng.gen_range(0.0..TAU);
        let r = range(&mut rng, 2.2, 7.2);
        let (x, z) = (c.x + a.cos() * r, c.y + a.sin() * r);

        let trunk_h = range(&mut rng, 0.75, 1.25);
        let (v, i) = mesh::cylinder(0.07, 0.10, trunk_h, 10, false, trunk_color);
        b.append(&v, &i, at(x, 0.75, z));

        let (v, i) = mesh::uv_sphere(range(&mut rng, 0.28, 0.55), 10, 14, leaf_color);
        b.append(&v, &i, at(x, 0.75 + 0.85, z));
    }

    let (v, i) = mesh::uv_sphere(1.45, 18, 26, opaque(rgb(0x2b7b5a)));
    let squash = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 0.65, 1.0),
        Quat::IDENTITY,
        Vec3::new(c.x, 1.15, c.y),
    );
    b.append(&v, &i, squash);
}

/// Scorched flats: basalt slabs, a ring of chimney towers, the volcano.
/// The lava pool itself is a separate animated mesh.
fn build_fire_quarter(b: &mut MeshBuilder, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed ^ 0xF1);
    let c = Zone::Fire.quarter_center();

    let slab_color = opaque(rgb(0x141414));
    for _ in 0..52 {
        let (v, i) = mesh::cuboid(
            range(&mut rng, 0.8, 2.1),
            range(&mut rng, 0.15, 0.35),
            range(&mut rng, 0.8, 2.1),
            slab_color,
        );
        let a = rng.gen_range(0.0..TAU);
        let r = range(&mut rng, 1.2, 7.8);
        let transform = Mat4::from_rotation_translation(
            Quat::from_axis_angle(Vec3::Y, rng.gen_range(0.0..PI)),
            Vec3::new(c.x + a.cos() * r, 0.16, c.y + a.sin() * r),
        );
        b.append(&v, &i, transform);
    }

    let tower_color = opaque(rgb(0x2b0f0b));
    for t in 0..20 {
        let (v, i) = mesh::cylinder(
            range(&mut rng, 0.45, 0.9),
            range(&mut rng, 0.55, 1.1),
            range(&mut rng, 1.2, 2.8),
            10,
            true,
            tower_color,
        );
        let a = t as f32 / 20.0 * TAU;
        let r = 5.8 + (t as f32 * 0.6).sin() * 0.25;
        b.append(&v, &i, at(c.x + a.cos() * r, 1.2, c.y + a.sin() * r));
    }

    let (v, i) = mesh::cone(3.8, 5.6, 28, tower_color);
    b.append(&v, &i, at(c.x, 2.4, c.y));
}

/// Frozen shore around the lagoon: squashed ice mounds and crystal shards.
fn build_water_quarter(b: &mut MeshBuilder, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed ^ 0xA2);
    let c = Zone::Water.quarter_center();

    let ice_color = opaque(rgb(0xbfeeff));
    for _ in 0..26 {
        let radius = range(&mut rng, 0.55, 1.05);
        let (v, i) = mesh::uv_sphere(radius, 14, 22, ice_color);
        let a = rng.gen_range(0.0..TAU);
        let r = range(&mut rng, 2.0, 7.0);
        let squash = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, range(&mut rng, 0.62, 0.78), 1.0),
            Quat::IDENTITY,
            Vec3::new(c.x + a.cos() * r, 0.75, c.y + a.sin() * r),
        );
        b.append(&v, &i, squash);
    }

    let shard_color = opaque(rgb(0xd8f6ff));
    for _ in 0..34 {
        let (v, i) = rock(range(&mut rng, 0.18, 0.65), shard_color);
        let a = rng.gen_range(0.0..TAU);
        let r = range(&mut rng, 3.0, 8.6);
        b.append(&v, &i, at(c.x + a.cos() * r, 0.6, c.y + a.sin() * r));
    }
}

/// Terraced temple mount with drifting rocks overhead. The rocks become
/// entities so the frame loop can bob and spin them.
fn build_air_quarter(b: &mut MeshBuilder, seed: u64, world: &mut World) {
    let mut rng = StdRng::seed_from_u64(seed ^ 0xB3);
    let c = Zone::Air.quarter_center();

    let stone_color = opaque(rgb(0xf2ead7));
    for t in 0..5 {
        let shrink = t as f32 * 1.1;
        let (v, i) = mesh::cylinder(6.6 - shrink, 6.9 - shrink, 0.55, 44, true, stone_color);
        b.append(&v, &i, at(c.x, 0.25 + t as f32 * 0.55, c.y));
    }

    let (v, i) = mesh::cylinder(1.25, 1.65, 3.2, 20, true, stone_color);
    b.append(&v, &i, at(c.x, 3.5, c.y));

    for _ in 0..22 {
        let a = rng.gen_range(0.0..TAU);
        let r = range(&mut rng, 3.0, 8.8);
        let position = Vec3::new(
            c.x + a.cos() * r,
            4.0 + range(&mut rng, 0.4, 3.2),
            c.y + a.sin() * r,
        );
        world.spawn((
            Transform::from_position_scale(position, range(&mut rng, 0.22, 0.75)),
            Bob {
                amplitude: 0.12,
                frequency: 1.3,
                phase: rng.gen_range(0.0..TAU),
            },
            Spin {
                yaw_rate: 0.15,
                pitch_rate: 0.08,
            },
            FloatingRock,
        ));
    }
}

/// Irregular boulder: a sphere with deterministic radial jitter. The jitter
/// is derived from vertex position so seam-duplicated vertices stay welded.
fn rock(radius: f32, color: [f32; 4]) -> (Vec<Vertex>, Vec<u32>) {
    let (mut vertices, indices) = mesh::uv_sphere(radius, 6, 8, color);
    for v in &mut vertices {
        let p = Vec3::from(v.position);
        let n = (p.x * 12.9898 + p.y * 78.233 + p.z * 37.719).sin();
        let factor = 1.0 + n * 0.18;
        let jittered = p * factor;
        v.position = jittered.to_array();
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_rocks_spawn_over_the_air_quarter() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3 ^ 0xB3);
        // Re-run just the entity spawning logic through the public builder
        // path is GPU-bound, so replicate the placement band check directly.
        let c = Zone::Air.quarter_center();
        for _ in 0..22 {
            let a = rng.gen_range(0.0..TAU);
            let r = range(&mut rng, 3.0, 8.8);
            let position = Vec3::new(
                c.x + a.cos() * r,
                4.0 + range(&mut rng, 0.4, 3.2),
                c.y + a.sin() * r,
            );
            world.spawn((
                Transform::from_position_scale(position, range(&mut rng, 0.22, 0.75)),
                Bob {
                    amplitude: 0.12,
                    frequency: 1.3,
                    phase: rng.gen_range(0.0..TAU),
                },
                Spin {
                    yaw_rate: 0.15,
                    pitch_rate: 0.08,
                },
                FloatingRock,
            ));
        }

        let mut count = 0;
        for (_, (t, _)) in world.query::<(&Transform, &FloatingRock)>().iter() {
            assert!(t.position.y >= 4.0 && t.position.y <= 7.6);
            let d = (t.position.x - c.x).hypot(t.position.z - c.y);
            assert!(d >= 2.9 && d <= 8.9);
            count += 1;
        }
        assert_eq!(count, 22);
    }

    #[test]
    fn rock_jitter_is_bounded_and_deterministic() {
        let (a, _) = rock(1.0, [1.0; 4]);
        let (b, _) = rock(1.0, [1.0; 4]);
        for (va, vb) in a.iter().zip(&b) {
            assert_eq!(va.position, vb.position);
            let r = Vec3::from(va.position).length();
            assert!(r >= 0.8 && r <= 1.2);
        }
    }

    #[test]
    fn animated_surfaces_sit_at_authored_heights() {
        assert!((lava_center().y - LAVA_HEIGHT).abs() < 1e-6);
        assert!((lagoon_center().y - LAGOON_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn quarter_centers_use_distinct_rng_streams() {
        // Sanity: per-quarter seeds differ so clusters don't repeat layouts.
        let seeds = [0xE0u64, 0xF1, 0xA2, 0xB3];
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
