//! The orbiting traveler: model loading and animation clock.
//!
//! The GLB import happens on a worker thread so a slow disk never stalls
//! the first frames; the result is polled each frame. A failed load leaves
//! the diorama running without the traveler.

use engine_core::{Mat4, Quat, Vec3};
use renderer::{pick_clip, ClipInfo, Mesh, ModelData, ModelError};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use crate::orbit::OrbitPose;

/// Uniform scale applied to the imported model.
const TRAVELER_SCALE: f32 = 0.9;

/// Loaded GPU-side traveler.
pub struct TravelerModel {
    pub mesh: Mesh,
    /// Selected locomotion clip, if the file carried animations.
    clip: Option<ClipInfo>,
    clip_time: f32,
}

enum LoadState {
    Pending(Receiver<Result<ModelData, ModelError>>),
    Ready(TravelerModel),
    Failed,
}

pub struct Traveler {
    state: LoadState,
}

impl Traveler {
    /// Kick off the background import.
    pub fn spawn_load(path: String) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(renderer::load_model(&path));
        });
        Self {
            state: LoadState::Pending(rx),
        }
    }

    /// Check the worker once per frame; uploads the mesh when the data
    /// arrives.
    pub fn poll(&mut self, device: &wgpu::Device) {
        let LoadState::Pending(rx) = &self.state else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(data)) => {
                let mesh = Mesh::new(device, &data.vertices, &data.indices);
                let clip = pick_clip(&data.clips).map(|i| data.clips[i].clone());
                if let Some(c) = &clip {
                    log::info!("traveler clip: '{}' ({:.2}s)", c.name, c.duration);
                }
                self.state = LoadState::Ready(TravelerModel {
                    mesh,
                    clip,
                    clip_time: 0.0,
                });
            }
            Ok(Err(e)) => {
                log::error!("traveler model failed to load: {}", e);
                self.state = LoadState::Failed;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("traveler loader thread exited without a result");
                self.state = LoadState::Failed;
            }
        }
    }

    /// Advance the animation clock, wrapping at the clip length.
    pub fn advance_clip(&mut self, dt: f32) {
        if let LoadState::Ready(model) = &mut self.state {
            if let Some(clip) = &model.clip {
                model.clip_time = advance_clip_time(model.clip_time, dt, clip.duration);
            }
        }
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.state {
            LoadState::Ready(model) => Some(&model.mesh),
            _ => None,
        }
    }

    pub fn clip_time(&self) -> f32 {
        match &self.state {
            LoadState::Ready(model) => model.clip_time,
            _ => 0.0,
        }
    }

    /// Model matrix for the current orbit pose: yaw to face the travel
    /// direction, then bank around the facing axis.
    pub fn model_matrix(pose: &OrbitPose) -> Mat4 {
        let yaw = (-pose.forward.z).atan2(pose.forward.x) + std::f32::consts::FRAC_PI_2;
        let rotation = Quat::from_axis_angle(Vec3::Y, yaw) * Quat::from_rotation_z(pose.bank);
        Mat4::from_scale_rotation_translation(
            Vec3::splat(TRAVELER_SCALE),
            rotation,
            pose.position,
        )
    }
}

/// Wraps the clip clock into [0, duration).
fn advance_clip_time(time: f32, dt: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    let mut t = time + dt;
    while t >= duration {
        t -= duration;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_clock_wraps() {
        assert!((advance_clip_time(0.9, 0.2, 1.0) - 0.1).abs() < 1e-6);
        assert!((advance_clip_time(0.0, 3.5, 1.0) - 0.5).abs() < 1e-5);
        assert_eq!(advance_clip_time(0.5, 0.1, 0.0), 0.0);
    }

    #[test]
    fn model_matrix_places_traveler_on_orbit() {
        let pose = OrbitPose {
            position: Vec3::new(18.8, 5.8, 0.0),
            forward: Vec3::new(0.0, 0.0, 1.0),
            bank: -0.14,
        };
        let m = Traveler::model_matrix(&pose);
        let origin = m.transform_point3(Vec3::ZERO);
        assert!(origin.distance(pose.position) < 1e-4);
        // Uniform scale survives the decomposition.
        let (scale, _, _) = m.to_scale_rotation_translation();
        assert!((scale.x - TRAVELER_SCALE).abs() < 1e-4);
    }
}
