//! glTF model loading for the traveler.
//!
//! The binary is imported off the render thread, flattened into a single
//! static mesh in CPU form, and uploaded once the result is polled back.

use crate::vertex::Vertex;
use glam::{Mat4, Vec3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model: {0}")]
    Import(#[from] gltf::Error),
    #[error("model has no readable geometry")]
    NoGeometry,
}

/// Metadata for one animation clip in the source file.
#[derive(Debug, Clone)]
pub struct ClipInfo {
    pub name: String,
    pub duration: f32,
}

/// CPU-side model data, ready to upload.
pub struct ModelData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub clips: Vec<ClipInfo>,
}

/// Substrings tried in order when choosing a locomotion clip.
const CLIP_PREFERENCE: [&str; 4] = ["fly", "hover", "run", "walk"];

/// Pick the clip to play: first case-insensitive substring match against the
/// preference list, otherwise the first clip in the file.
pub fn pick_clip(clips: &[ClipInfo]) -> Option<usize> {
    for want in CLIP_PREFERENCE {
        if let Some(i) = clips
            .iter()
            .position(|c| c.name.to_lowercase().contains(want))
        {
            return Some(i);
        }
    }
    if clips.is_empty() {
        None
    } else {
        Some(0)
    }
}

/// Import a glTF/GLB file and flatten its default scene into one mesh with
/// node transforms baked in. Skinning is ignored; playback only advances a
/// clock over the clip metadata.
pub fn load_model(path: &str) -> Result<ModelData, ModelError> {
    let (document, buffers, _images) = gltf::import(path)?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(ModelError::NoGeometry)?;
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, &buffers, &mut vertices, &mut indices);
    }
    if indices.is_empty() {
        return Err(ModelError::NoGeometry);
    }

    let mut clips = Vec::new();
    for animation in document.animations() {
        let mut duration = 0.0f32;
        for channel in animation.channels() {
            let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
            if let Some(inputs) = reader.read_inputs() {
                for t in inputs {
                    duration = duration.max(t);
                }
            }
        }
        clips.push(ClipInfo {
            name: animation.name().unwrap_or("").to_string(),
            duration: duration.max(f32::EPSILON),
        });
    }

    log::info!(
        "loaded model '{}': {} vertices, {} clips",
        path,
        vertices.len(),
        clips.len()
    );
    Ok(ModelData {
        vertices,
        indices,
        clips,
    })
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let normal_mat = transform.inverse().transpose();
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(p) => p.collect(),
                None => continue,
            };
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|n| n.collect())
                .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|t| t.into_f32().collect())
                .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);
            let color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            let base = vertices.len() as u32;
            for ((p, n), uv) in positions.iter().zip(&normals).zip(&uvs) {
                let pos = transform.transform_point3(Vec3::from(*p));
                let nrm = normal_mat
                    .transform_vector3(Vec3::from(*n))
                    .normalize_or_zero();
                vertices.push(Vertex::with_color(
                    pos.to_array(),
                    nrm.to_array(),
                    *uv,
                    color,
                ));
            }
            match reader.read_indices() {
                Some(idx) => indices.extend(idx.into_u32().map(|i| i + base)),
                None => indices.extend(base..vertices.len() as u32),
            }
        }
    }

    for child in node.children() {
        collect_node(&child, transform, buffers, vertices, indices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clips(names: &[&str]) -> Vec<ClipInfo> {
        names
            .iter()
            .map(|n| ClipInfo {
                name: n.to_string(),
                duration: 1.0,
            })
            .collect()
    }

    #[test]
    fn clip_preference_order() {
        let c = clips(&["Idle", "WalkCycle", "FlyFast"]);
        assert_eq!(pick_clip(&c), Some(2));

        let c = clips(&["Idle", "WalkCycle"]);
        assert_eq!(pick_clip(&c), Some(1));
    }

    #[test]
    fn clip_match_is_case_insensitive() {
        let c = clips(&["Idle", "HOVER_loop"]);
        assert_eq!(pick_clip(&c), Some(1));
    }

    #[test]
    fn falls_back_to_first_clip() {
        let c = clips(&["TailSwish", "Blink"]);
        assert_eq!(pick_clip(&c), Some(0));
        assert_eq!(pick_clip(&[]), None);
    }
}
