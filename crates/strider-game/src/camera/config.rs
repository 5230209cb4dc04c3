//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};
use strider_physics::WORLD_LAYER;

/// Camera rig configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Smooth time of the follow spring, in seconds
    pub follow_smooth_time: f32,
    /// Yaw degrees per unit of horizontal look input
    pub look_speed: f32,
    /// Pitch degrees per unit of vertical look input
    pub pivot_speed: f32,
    /// Minimum pitch angle in degrees (negative = looking up)
    pub min_pitch: f32,
    /// Maximum pitch angle in degrees
    pub max_pitch: f32,
    /// Pivot position relative to the followed point, in rig space
    pub pivot_offset: Vec3,
    /// Resting boom length; negative puts the camera behind the pivot
    pub default_boom_length: f32,
    /// Radius of the sphere swept from pivot to camera
    pub collision_radius: f32,
    /// Gap kept between the camera and an obstruction
    pub collision_offset: f32,
    /// Smallest boom magnitude allowed after collision correction
    pub min_collision_offset: f32,
    /// Fraction of the remaining boom distance covered per 1/60 s
    pub boom_smoothing: f32,
    /// Layer mask of geometry the camera collides with
    pub layers: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_smooth_time: 0.2,
            look_speed: 2.0,
            pivot_speed: 2.0,
            min_pitch: -35.0,
            max_pitch: 35.0,
            pivot_offset: Vec3::new(0.0, 1.6, 0.0),
            default_boom_length: -3.0,
            collision_radius: 0.2,
            collision_offset: 0.2,
            min_collision_offset: 0.2,
            boom_smoothing: 0.2,
            layers: WORLD_LAYER,
        }
    }
}
