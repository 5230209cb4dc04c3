//! Strider Core - Core types and utilities for the Strider character controller
//!
//! This crate provides the foundational pieces shared by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform with forward/right helpers and yaw look-rotation
//! - Critically damped smoothing used by the camera and animation blending
//! - Frame clock with a fixed-step accumulator for the physics phase

pub mod math;
pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use math::{frame_lerp_factor, horizontal_direction, smooth_damp, smooth_damp_vec3, yaw_rotation};
pub use time::{FrameClock, TimeConfig};
pub use types::Transform;
