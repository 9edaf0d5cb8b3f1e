//! Mesh data structures and primitive generation.
//!
//! Primitives are generated CPU-side as vertex/index vectors so the game
//! crate can compose them into authored scenery with `MeshBuilder` before a
//! single GPU upload per group.

use crate::vertex::Vertex;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index data.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }
}

/// Accumulates transformed primitives into one vertex/index soup.
#[derive(Default)]
pub struct MeshBuilder {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive under a transform. Normals go through the inverse
    /// transpose so non-uniform scales stay correct.
    pub fn append(&mut self, vertices: &[Vertex], indices: &[u32], transform: Mat4) {
        let base = self.vertices.len() as u32;
        let normal_mat = transform.inverse().transpose();
        for v in vertices {
            let p = transform.transform_point3(Vec3::from(v.position));
            let n = normal_mat
                .transform_vector3(Vec3::from(v.normal))
                .normalize_or_zero();
            self.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                tex_coords: v.tex_coords,
                color: v.color,
            });
        }
        self.indices.extend(indices.iter().map(|i| i + base));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Upload the accumulated geometry.
    pub fn build(&self, device: &wgpu::Device) -> Mesh {
        Mesh::new(device, &self.vertices, &self.indices)
    }
}

/// Axis-aligned cuboid centered at the origin.
pub fn cuboid(w: f32, h: f32, d: f32, color: [f32; 4]) -> (Vec<Vertex>, Vec<u32>) {
    let (x, y, z) = (w * 0.5, h * 0.5, d * 0.5);
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        ([0.0, 0.0, 1.0], [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]]),
        // -Z
        ([0.0, 0.0, -1.0], [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]]),
        // +Y
        ([0.0, 1.0, 0.0], [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]]),
        // -Y
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]]),
        // +X
        ([1.0, 0.0, 0.0], [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]]),
        // -X
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        for (corner, uv) in corners.iter().zip(uvs) {
            vertices.push(Vertex::with_color(*corner, normal, uv, color));
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// Cylinder along Y, centered at the origin. `capped = false` leaves the ends
/// open (island underside). Differing radii give a tapered shell.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    capped: bool,
    color: [f32; 4],
) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        let (sin, cos) = a.sin_cos();
        let n = Vec3::new(cos, slope, sin).normalize();
        let u = i as f32 / segments as f32;
        vertices.push(Vertex::with_color(
            [cos * radius_top, half, sin * radius_top],
            n.to_array(),
            [u, 0.0],
            color,
        ));
        vertices.push(Vertex::with_color(
            [cos * radius_bottom, -half, sin * radius_bottom],
            n.to_array(),
            [u, 1.0],
            color,
        ));
    }
    for i in 0..segments {
        let o = i * 2;
        indices.extend([o, o + 1, o + 2, o + 2, o + 1, o + 3]);
    }

    if capped {
        for (y, radius, normal, flip) in [
            (half, radius_top, [0.0, 1.0, 0.0], false),
            (-half, radius_bottom, [0.0, -1.0, 0.0], true),
        ] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::with_color([0.0, y, 0.0], normal, [0.5, 0.5], color));
            for i in 0..=segments {
                let a = i as f32 / segments as f32 * TAU;
                let (sin, cos) = a.sin_cos();
                vertices.push(Vertex::with_color(
                    [cos * radius, y, sin * radius],
                    normal,
                    [cos * 0.5 + 0.5, sin * 0.5 + 0.5],
                    color,
                ));
            }
            for i in 0..segments {
                let (a, b) = (center + 1 + i, center + 2 + i);
                if flip {
                    indices.extend([center, a, b]);
                } else {
                    indices.extend([center, b, a]);
                }
            }
        }
    }
    (vertices, indices)
}

/// Cone along Y sitting on a capped base.
pub fn cone(radius: f32, height: f32, segments: u32, color: [f32; 4]) -> (Vec<Vertex>, Vec<u32>) {
    cylinder(0.02, radius, height, segments, true, color)
}

/// UV sphere centered at the origin. `v` runs 0 at the top pole to 1 at the
/// bottom, which the sky dome relies on for its vertical gradient.
pub fn uv_sphere(
    radius: f32,
    lat_segments: u32,
    lon_segments: u32,
    color: [f32; 4],
) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=lat_segments {
        let v = lat as f32 / lat_segments as f32;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for lon in 0..=lon_segments {
            let u = lon as f32 / lon_segments as f32;
            let phi = u * TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            vertices.push(Vertex::with_color(
                (n * radius).to_array(),
                n.to_array(),
                [u, v],
                color,
            ));
        }
    }
    let stride = lon_segments + 1;
    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let a = lat * stride + lon;
            let b = a + stride;
            indices.extend([a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

/// Torus in the XZ plane (major radius around Y).
pub fn torus(
    radius: f32,
    tube: f32,
    ring_segments: u32,
    tube_segments: u32,
    color: [f32; 4],
) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=ring_segments {
        let ra = r as f32 / ring_segments as f32 * TAU;
        let (sin_r, cos_r) = ra.sin_cos();
        for t in 0..=tube_segments {
            let ta = t as f32 / tube_segments as f32 * TAU;
            let (sin_tu, cos_tu) = ta.sin_cos();
            let center = Vec3::new(cos_r * radius, 0.0, sin_r * radius);
            let n = Vec3::new(cos_r * cos_tu, sin_tu, sin_r * cos_tu);
            vertices.push(Vertex::with_color(
                (center + n * tube).to_array(),
                n.to_array(),
                [r as f32 / ring_segments as f32, t as f32 / tube_segments as f32],
                color,
            ));
        }
    }
    let stride = tube_segments + 1;
    for r in 0..ring_segments {
        for t in 0..tube_segments {
            let a = r * stride + t;
            let b = a + stride;
            indices.extend([a, a + 1, b, b, a + 1, b + 1]);
        }
    }
    (vertices, indices)
}

/// Filled arc in the XZ plane facing +Y. `arc = TAU` gives a full disc.
pub fn disc(
    radius: f32,
    segments: u32,
    start_angle: f32,
    arc: f32,
    color: [f32; 4],
) -> (Vec<Vertex>, Vec<u32>) {
    let normal = [0.0, 1.0, 0.0];
    let mut vertices = vec![Vertex::with_color([0.0, 0.0, 0.0], normal, [0.5, 0.5], color)];
    let mut indices = Vec::new();
    for i in 0..=segments {
        let a = start_angle + arc * i as f32 / segments as f32;
        let (sin, cos) = a.sin_cos();
        vertices.push(Vertex::with_color(
            [cos * radius, 0.0, sin * radius],
            normal,
            [cos * 0.5 + 0.5, sin * 0.5 + 0.5],
            color,
        ));
    }
    for i in 0..segments {
        indices.extend([0, 2 + i, 1 + i]);
    }
    (vertices, indices)
}

/// Flat ring (annulus) in the XZ plane facing +Y.
pub fn annulus(inner: f32, outer: f32, segments: u32, color: [f32; 4]) -> (Vec<Vertex>, Vec<u32>) {
    let normal = [0.0, 1.0, 0.0];
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        let (sin, cos) = a.sin_cos();
        vertices.push(Vertex::with_color([cos * inner, 0.0, sin * inner], normal, [0.0, 0.0], color));
        vertices.push(Vertex::with_color([cos * outer, 0.0, sin * outer], normal, [1.0, 0.0], color));
    }
    for i in 0..segments {
        let o = i * 2;
        indices.extend([o, o + 2, o + 1, o + 1, o + 2, o + 3]);
    }
    (vertices, indices)
}

/// Grid plane in XZ centered at the origin, heights from `height_fn`,
/// normals by central differences.
pub fn grid_plane(
    size: f32,
    segments: u32,
    color: [f32; 4],
    height_fn: impl Fn(f32, f32) -> f32,
) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let step = size / segments as f32;
    let half = size * 0.5;

    for row in 0..=segments {
        let z = row as f32 * step - half;
        for col in 0..=segments {
            let x = col as f32 * step - half;
            let y = height_fn(x, z);
            let e = step * 0.5;
            let dx = height_fn(x + e, z) - height_fn(x - e, z);
            let dz = height_fn(x, z + e) - height_fn(x, z - e);
            let n = Vec3::new(-dx, 2.0 * e, -dz).normalize();
            vertices.push(Vertex::with_color(
                [x, y, z],
                n.to_array(),
                [col as f32 / segments as f32, row as f32 / segments as f32],
                color,
            ));
        }
    }
    let stride = segments + 1;
    for row in 0..segments {
        for col in 0..segments {
            let a = row * stride + col;
            let b = a + stride;
            indices.extend([a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_24_vertices_36_indices() {
        let (v, i) = cuboid(1.0, 2.0, 3.0, [1.0; 4]);
        assert_eq!(v.len(), 24);
        assert_eq!(i.len(), 36);
        assert!(i.iter().all(|&idx| (idx as usize) < v.len()));
    }

    #[test]
    fn sphere_uv_poles() {
        let (v, _) = uv_sphere(1.0, 8, 8, [1.0; 4]);
        assert_eq!(v.first().unwrap().tex_coords[1], 0.0);
        assert_eq!(v.last().unwrap().tex_coords[1], 1.0);
    }

    #[test]
    fn builder_offsets_indices_per_append() {
        let mut b = MeshBuilder::new();
        let (v, i) = cuboid(1.0, 1.0, 1.0, [1.0; 4]);
        b.append(&v, &i, Mat4::IDENTITY);
        b.append(&v, &i, Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(b.vertices.len(), 48);
        assert_eq!(b.indices.len(), 72);
        assert_eq!(b.indices[36], 24);
        // Second cuboid actually moved.
        assert!((b.vertices[24].position[0] - 4.5).abs() < 1e-5);
    }

    #[test]
    fn grid_plane_samples_height_fn() {
        let (v, _) = grid_plane(10.0, 4, [1.0; 4], |x, z| x + z);
        for vert in &v {
            assert!((vert.position[1] - (vert.position[0] + vert.position[2])).abs() < 1e-4);
        }
    }
}
