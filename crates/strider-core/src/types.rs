//! Core types used throughout Strider

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of a rig or character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Transform a point from local space into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_axes() {
        let transform = Transform::default();
        assert_eq!(transform.forward(), Vec3::NEG_Z);
        assert_eq!(transform.right(), Vec3::X);
    }

    #[test]
    fn test_transform_point() {
        let transform = Transform::from_position_rotation(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let world = transform.transform_point(Vec3::NEG_Z);
        assert!(world.distance(Vec3::new(0.0, 0.0, 0.0)) < 1e-5);
    }
}
