//! In-memory animation backend
//!
//! Holds damped float parameters, flags and the cue currently playing. Hosts
//! without an animation engine (and the tests) drive this directly.

use strider_core::smooth_damp;

use super::params::{AnimCue, AnimFlag, AnimParam, AnimationBackend};

#[derive(Debug, Clone, Copy, Default)]
struct DampedFloat {
    value: f32,
    velocity: f32,
}

/// Parameter table implementing [`AnimationBackend`]
#[derive(Debug, Clone, Default)]
pub struct AnimatorParameters {
    floats: [DampedFloat; AnimParam::COUNT],
    flags: [bool; AnimFlag::COUNT],
    playing: Option<AnimCue>,
    /// Cues started since the last drain, in order
    started: Vec<AnimCue>,
}

impl AnimatorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current (smoothed) value of a float parameter
    pub fn value(&self, param: AnimParam) -> f32 {
        self.floats[param as usize].value
    }

    /// The cue most recently started
    pub fn playing(&self) -> Option<AnimCue> {
        self.playing
    }

    /// Cues started since the last call, oldest first
    pub fn drain_cues(&mut self) -> Vec<AnimCue> {
        std::mem::take(&mut self.started)
    }
}

impl AnimationBackend for AnimatorParameters {
    fn set_smoothed(&mut self, param: AnimParam, target: f32, damp_time: f32, dt: f32) {
        let slot = &mut self.floats[param as usize];
        slot.value = smooth_damp(slot.value, target, &mut slot.velocity, damp_time, dt);
    }

    fn set_flag(&mut self, flag: AnimFlag, value: bool) {
        self.flags[flag as usize] = value;
    }

    fn flag(&self, flag: AnimFlag) -> bool {
        self.flags[flag as usize]
    }

    fn play_cue(&mut self, cue: AnimCue) {
        if self.playing == Some(cue) {
            return;
        }
        self.playing = Some(cue);
        self.started.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothed_parameter_glides() {
        let mut params = AnimatorParameters::new();
        params.set_smoothed(AnimParam::Vertical, 1.0, 0.1, 1.0 / 60.0);

        let first = params.value(AnimParam::Vertical);
        assert!(first > 0.0 && first < 1.0);

        for _ in 0..120 {
            params.set_smoothed(AnimParam::Vertical, 1.0, 0.1, 1.0 / 60.0);
        }
        assert!((params.value(AnimParam::Vertical) - 1.0).abs() < 1e-3);
        assert_eq!(params.value(AnimParam::Horizontal), 0.0);
    }

    #[test]
    fn test_flags() {
        let mut params = AnimatorParameters::new();
        assert!(!params.flag(AnimFlag::IsJumping));
        params.set_flag(AnimFlag::IsJumping, true);
        assert!(params.flag(AnimFlag::IsJumping));
        assert!(!params.flag(AnimFlag::IsGrounded));
    }

    #[test]
    fn test_retriggering_playing_cue_is_idempotent() {
        let mut params = AnimatorParameters::new();
        params.play_cue(AnimCue::Falling);
        params.play_cue(AnimCue::Falling);
        params.play_cue(AnimCue::Land);
        params.play_cue(AnimCue::Falling);

        assert_eq!(params.playing(), Some(AnimCue::Falling));
        assert_eq!(
            params.drain_cues(),
            vec![AnimCue::Falling, AnimCue::Land, AnimCue::Falling]
        );
        assert!(params.drain_cues().is_empty());
    }
}
