//! Movement intent to blend-tree parameters
//!
//! Continuous axis values are snapped to a small set of levels before they
//! reach the blend tree, then written through the backend's damped setter so
//! the visible blend glides between levels.

use serde::{Deserialize, Serialize};

use crate::input::MovementIntent;

use super::params::{AnimParam, AnimationBackend};

/// Blend value reserved for the sprint state. Overrides both axes.
pub const SPRINT_BLEND: f32 = 2.0;

/// Animation bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Damp time for blend parameters, in seconds
    pub damp_time: f32,
    /// Axis magnitude above which the blend snaps to a full step
    pub snap_threshold: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            damp_time: 0.1,
            snap_threshold: 0.55,
        }
    }
}

/// Snapped blend targets for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlendTargets {
    pub horizontal: f32,
    pub vertical: f32,
}

/// Quantize one axis to {-1, -0.5, 0, 0.5, 1}.
///
/// `threshold` itself belongs to the half step.
pub fn snap_axis(intent: f32, threshold: f32) -> f32 {
    if intent > threshold {
        1.0
    } else if intent > 0.0 {
        0.5
    } else if intent < -threshold {
        -1.0
    } else if intent < 0.0 {
        -0.5
    } else {
        0.0
    }
}

/// Blend targets for an intent; sprinting pins both axes to [`SPRINT_BLEND`]
pub fn blend_targets(intent: &MovementIntent, threshold: f32) -> BlendTargets {
    if intent.sprinting {
        return BlendTargets {
            horizontal: SPRINT_BLEND,
            vertical: SPRINT_BLEND,
        };
    }

    BlendTargets {
        horizontal: snap_axis(intent.horizontal, threshold),
        vertical: snap_axis(intent.vertical, threshold),
    }
}

/// Converts movement intent into smoothed blend parameters
#[derive(Debug, Clone)]
pub struct AnimationBridge {
    config: AnimationConfig,
    targets: BlendTargets,
}

impl AnimationBridge {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            targets: BlendTargets::default(),
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Targets written by the most recent update
    pub fn targets(&self) -> BlendTargets {
        self.targets
    }

    /// Snap `intent` and push both axes through the damped setter
    pub fn update_animator_values<A: AnimationBackend>(
        &mut self,
        backend: &mut A,
        intent: &MovementIntent,
        dt: f32,
    ) -> BlendTargets {
        let targets = blend_targets(intent, self.config.snap_threshold);

        backend.set_smoothed(AnimParam::Horizontal, targets.horizontal, self.config.damp_time, dt);
        backend.set_smoothed(AnimParam::Vertical, targets.vertical, self.config.damp_time, dt);

        self.targets = targets;
        targets
    }
}
