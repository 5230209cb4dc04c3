//! Movement configuration and constants

use serde::{Deserialize, Serialize};
use strider_physics::WORLD_LAYER;

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in meters per second
    pub walk_speed: f32,
    /// Sprinting speed in meters per second
    pub sprint_speed: f32,
    /// Turn rate; facing covers `rotation_speed * dt` of the remaining angle per step
    pub rotation_speed: f32,
    /// Apex height of a jump in meters
    pub jump_height: f32,
    /// Gravity used for the jump impulse (negative = down)
    pub gravity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.5,
            sprint_speed: 7.0,
            rotation_speed: 15.0,
            jump_height: 3.0,
            gravity: -15.0,
        }
    }
}

impl MovementConfig {
    /// Get the current max speed based on sprint state
    pub fn max_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.sprint_speed
        } else {
            self.walk_speed
        }
    }

    /// Initial vertical velocity that reaches `jump_height` under `gravity`
    pub fn jump_velocity(&self) -> f32 {
        (-2.0 * self.gravity * self.jump_height).max(0.0).sqrt()
    }
}

/// Downward probes used for ground contact and landing detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundProbeConfig {
    /// Height above the feet the probes start from
    pub height_offset: f32,
    /// Radius of the tight probe that decides grounded state
    pub grounded_radius: f32,
    /// Cast distance of the grounded probe
    pub grounded_distance: f32,
    /// Radius of the wide probe that detects an imminent landing
    pub landing_radius: f32,
    /// Cast distance of the landing probe
    pub landing_distance: f32,
    /// Layer mask of walkable geometry
    pub layers: u32,
}

impl Default for GroundProbeConfig {
    fn default() -> Self {
        Self {
            height_offset: 0.5,
            grounded_radius: 0.2,
            grounded_distance: 0.35,
            landing_radius: 0.45,
            landing_distance: 1.5,
            layers: WORLD_LAYER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_speed() {
        let config = MovementConfig::default();
        assert_eq!(config.max_speed(false), 1.5);
        assert_eq!(config.max_speed(true), 7.0);
    }

    #[test]
    fn test_jump_velocity_formula() {
        let config = MovementConfig::default();
        let expected = (2.0_f32 * 15.0 * 3.0).sqrt();
        assert!((config.jump_velocity() - expected).abs() < 1e-5);

        let flat = MovementConfig {
            gravity: 0.0,
            ..MovementConfig::default()
        };
        assert_eq!(flat.jump_velocity(), 0.0);
    }
}
