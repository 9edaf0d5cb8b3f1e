//! Authored island geometry: displaced top plate, rocky underside, rim
//! torus, four ground sectors, and the ring road with its paving tiles.

use crate::zone::{rgb, Zone};
use engine_core::{Mat4, Quat, Vec3};
use procgen::IslandHeightfield;
use renderer::{mesh, Mesh, MeshBuilder};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

/// Side length of the island top plate.
const ISLAND_SIZE: f32 = 40.0;
const ISLAND_SEGMENTS: u32 = 120;

const ROAD_TILE_COUNT: u32 = 260;

fn opaque(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}

/// GPU meshes for the island body. Sectors are separate so the Fire quarter
/// can pulse its emissive term per frame.
pub struct IslandMeshes {
    /// Top plate, underside, rim, road and tiles merged into one draw.
    pub terrain: Mesh,
    /// Ground sector discs, indexed by zone.
    pub sectors: [Mesh; 4],
}

/// Ground color of each zone's sector disc. The Fire and Water quarters
/// swap colors: Fire ground reads as deep water blue while Water ground
/// reads as scorched red, which is the look this diorama always had.
pub fn sector_color(zone: Zone) -> [f32; 3] {
    match zone {
        Zone::Earth => rgb(0x2f6b45),
        Zone::Fire => rgb(0x1e5aa8),
        Zone::Water => rgb(0x3b1410),
        Zone::Air => rgb(0xe8d9b8),
    }
}

/// Ember glow added on top of the Fire sector disc.
pub fn fire_sector_emissive() -> [f32; 3] {
    rgb(0x2a0703)
}

pub fn build_island(device: &wgpu::Device, seed: u64) -> IslandMeshes {
    let heightfield = IslandHeightfield::island(seed);
    let mut b = MeshBuilder::new();

    // Displaced top plate.
    let top_color = opaque(rgb(0x2f6b45));
    let (v, i) = mesh::grid_plane(ISLAND_SIZE, ISLAND_SEGMENTS, top_color, |x, z| {
        heightfield.sample(x, z)
    });
    b.append(&v, &i, Mat4::IDENTITY);

    // Rocky underside: open tapered shell hanging below the plate.
    let (v, i) = mesh::cylinder(16.5, 20.5, 7.8, 110, false, opaque(rgb(0x1a1a1a)));
    b.append(&v, &i, Mat4::from_translation(Vec3::new(0.0, -3.6, 0.0)));

    // Rim torus hugging the plate edge.
    let (v, i) = mesh::torus(18.6, 0.42, 200, 16, opaque(rgb(0x0f172a)));
    b.append(&v, &i, Mat4::from_translation(Vec3::new(0.0, 0.12, 0.0)));

    // Ring road.
    let (v, i) = mesh::annulus(13.2, 14.4, 260, opaque(rgb(0x6b7280)));
    b.append(&v, &i, Mat4::from_translation(Vec3::new(0.0, 0.16, 0.0)));

    // Paving tiles along the road centerline, alternating a small
    // perpendicular jitter.
    let (tile_v, tile_i) = mesh::cuboid(0.52, 0.06, 0.28, opaque(rgb(0x9099a6)));
    for t in 0..ROAD_TILE_COUNT {
        let a = t as f32 / ROAD_TILE_COUNT as f32 * TAU;
        let r = 13.8 + (t as f32 * 0.9).sin() * 0.10;
        let jitter = if t % 2 == 0 { 0.14 } else { -0.14 };
        let pos = Vec3::new(
            a.cos() * r + (a + FRAC_PI_2).cos() * jitter,
            0.18,
            a.sin() * r + (a + FRAC_PI_2).sin() * jitter,
        );
        let transform = Mat4::from_rotation_translation(Quat::from_axis_angle(Vec3::Y, -a), pos);
        b.append(&tile_v, &tile_i, transform);
    }

    let terrain = b.build(device);

    let sectors = Zone::ALL.map(|zone| build_sector(device, zone));

    IslandMeshes { terrain, sectors }
}

/// One quarter-circle ground disc centered on the zone's landmark cluster
/// angle, floating just above the top plate.
fn build_sector(device: &wgpu::Device, zone: Zone) -> Mesh {
    let c = zone.quarter_center();
    let center_angle = c.y.atan2(c.x);
    let start = center_angle - FRAC_PI_4;

    let (v, i) = mesh::disc(18.0, 90, start, FRAC_PI_2, opaque(sector_color(zone)));
    let mut b = MeshBuilder::new();
    b.append(&v, &i, Mat4::from_translation(Vec3::new(0.0, 0.14, 0.0)));
    b.build(device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_and_water_grounds_are_swapped() {
        assert_eq!(sector_color(Zone::Fire), rgb(0x1e5aa8));
        assert_eq!(sector_color(Zone::Water), rgb(0x3b1410));
    }

    #[test]
    fn sector_spans_line_up_with_ring_order() {
        // Each zone's disc is centered a quarter turn past the previous one.
        let mut angles: Vec<f32> = Zone::ALL
            .iter()
            .map(|z| {
                let c = z.quarter_center();
                engine_core::wrap_angle(c.y.atan2(c.x))
            })
            .collect();
        let first = angles[0];
        for (i, a) in angles.iter_mut().enumerate() {
            let expected = engine_core::wrap_angle(first + i as f32 * FRAC_PI_2);
            assert!((*a - expected).abs() < 1e-5 || (*a - expected).abs() > TAU - 1e-5);
        }
    }
}
