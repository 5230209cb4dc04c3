//! Strider Game - Third-person character control
//!
//! Provides camera-relative locomotion, the orbit camera rig, animation
//! parameter bridging and the controller that ties them to a host loop.

pub mod animation;
pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod player;

pub use animation::{
    AnimCue, AnimFlag, AnimParam, AnimationBackend, AnimationBridge, AnimationConfig,
    AnimatorParameters, BlendTargets,
};
pub use camera::{CameraBasis, CameraConfig, CameraRig, CameraState};
pub use config::ControllerConfig;
pub use controller::{CharacterController, CharacterControllerBuilder};
pub use error::{ConfigError, SetupError};
pub use input::{
    InputAction, InputBindings, InputFrame, InputHandler, InputSource, InputState, MovementIntent,
};
pub use player::{GroundProbeConfig, Locomotion, LocomotionPhase, LocomotionState, MovementConfig};
