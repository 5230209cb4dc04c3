//! Player locomotion module
//!
//! Provides camera-relative movement, facing, grounding and jumping on a
//! physics-driven body.

mod locomotion;
mod movement;

pub use locomotion::{Locomotion, LocomotionPhase, LocomotionState};
pub use movement::{GroundProbeConfig, MovementConfig};
