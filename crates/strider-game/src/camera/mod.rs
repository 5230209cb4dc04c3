//! Camera system module
//!
//! Provides the third-person camera rig: smoothed follow, yaw/pitch look and
//! boom collision against world geometry.

mod config;
mod rig;

pub use config::CameraConfig;
pub use rig::{CameraBasis, CameraRig, CameraState};
