//! Animation module
//!
//! Turns movement intent into blend parameters and carries the flags and cues
//! locomotion shares with the animation graph.

mod bridge;
mod parameters;
mod params;

pub use bridge::{blend_targets, snap_axis, AnimationBridge, AnimationConfig, BlendTargets, SPRINT_BLEND};
pub use parameters::AnimatorParameters;
pub use params::{AnimCue, AnimFlag, AnimParam, AnimationBackend};
