//! Character rigid body setup

use glam::Vec3;
use rapier3d::prelude::*;

use crate::probe::CHARACTER_LAYER;
use crate::PhysicsWorld;

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Body mass in kilograms
    pub mass: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            mass: 70.0,
        }
    }
}

impl PhysicsWorld {
    /// Spawn a dynamic capsule for a character standing at `feet`.
    ///
    /// The body origin is at the feet and its rotations are locked, so the
    /// controller drives facing itself. The capsule is a member of
    /// [`CHARACTER_LAYER`] only, which keeps it out of ground and camera probes.
    pub fn spawn_character(&mut self, config: &CharacterBodyConfig, feet: Vec3) -> RigidBodyHandle {
        let half_height = (config.height - 2.0 * config.radius) / 2.0;

        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![feet.x, feet.y, feet.z])
            .lock_rotations()
            .build();

        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), config.radius)
            .translation(vector![0.0, config.height / 2.0, 0.0])
            .mass(config.mass)
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(CHARACTER_LAYER),
                Group::ALL,
            ))
            .build();

        let (handle, _collider) = self.add_dynamic_body(rigid_body, collider);
        handle
    }
}
