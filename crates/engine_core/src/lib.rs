//! Core engine types and utilities for Skyring.
//!
//! This crate provides the foundational pieces used across all systems:
//! - Framerate-independent damping and angle math
//! - Frame timing with a fixed-timestep accumulator
//! - Transform and small animated-decor components

pub mod components;
pub mod math;
pub mod time;
pub mod transform;

pub use components::*;
pub use math::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
