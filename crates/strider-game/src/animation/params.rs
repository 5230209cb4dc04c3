//! Animation parameter identifiers and the backend seam

/// Float blend parameters driven by the animation bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    /// Strafe blend axis
    Horizontal,
    /// Forward/back blend axis
    Vertical,
}

impl AnimParam {
    pub const COUNT: usize = 2;

    /// Parameter name as authored in the animation graph
    pub const fn name(self) -> &'static str {
        match self {
            AnimParam::Horizontal => "Horizontal",
            AnimParam::Vertical => "Vertical",
        }
    }
}

/// Boolean parameters shared between locomotion and the animation graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimFlag {
    /// Raised by a jump, cleared by the graph (or on landing)
    IsJumping,
    /// Mirrors the physics ground probe
    IsGrounded,
}

impl AnimFlag {
    pub const COUNT: usize = 2;

    pub const fn name(self) -> &'static str {
        match self {
            AnimFlag::IsJumping => "isJumping",
            AnimFlag::IsGrounded => "isGrounded",
        }
    }
}

/// One-shot animation cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimCue {
    Falling,
    Land,
    Jump,
}

impl AnimCue {
    pub const fn name(self) -> &'static str {
        match self {
            AnimCue::Falling => "Falling",
            AnimCue::Land => "Land",
            AnimCue::Jump => "Jump",
        }
    }
}

/// Animation playback backend.
///
/// Implementations resolve the identifiers above to whatever handles their
/// graph uses once, at construction.
pub trait AnimationBackend {
    /// Move a float parameter toward `target` over `damp_time`
    fn set_smoothed(&mut self, param: AnimParam, target: f32, damp_time: f32, dt: f32);

    /// Set a boolean parameter
    fn set_flag(&mut self, flag: AnimFlag, value: bool);

    /// Read a boolean parameter
    fn flag(&self, flag: AnimFlag) -> bool;

    /// Trigger a cue. Re-triggering the cue that is already playing is harmless.
    fn play_cue(&mut self, cue: AnimCue);
}
