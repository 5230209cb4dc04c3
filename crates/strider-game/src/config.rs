//! Controller configuration aggregate
//!
//! Every section carries `#[serde(default)]`, so a TOML document only needs
//! the values it overrides.

use serde::{Deserialize, Serialize};
use strider_core::TimeConfig;

use crate::animation::AnimationConfig;
use crate::camera::CameraConfig;
use crate::error::ConfigError;
use crate::player::{GroundProbeConfig, MovementConfig};

/// Immutable tuning for one character controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementConfig,
    pub ground: GroundProbeConfig,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub time: TimeConfig,
}

fn require(ok: bool, field: &'static str, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, reason))
    }
}

impl ControllerConfig {
    /// Parse a TOML document and validate the result
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Every float the controller reads, by config path
    fn float_fields(&self) -> [(&'static str, f32); 28] {
        let m = &self.movement;
        let g = &self.ground;
        let c = &self.camera;
        let a = &self.animation;
        let t = &self.time;
        [
            ("movement.walk_speed", m.walk_speed),
            ("movement.sprint_speed", m.sprint_speed),
            ("movement.rotation_speed", m.rotation_speed),
            ("movement.jump_height", m.jump_height),
            ("movement.gravity", m.gravity),
            ("ground.height_offset", g.height_offset),
            ("ground.grounded_radius", g.grounded_radius),
            ("ground.grounded_distance", g.grounded_distance),
            ("ground.landing_radius", g.landing_radius),
            ("ground.landing_distance", g.landing_distance),
            ("camera.follow_smooth_time", c.follow_smooth_time),
            ("camera.look_speed", c.look_speed),
            ("camera.pivot_speed", c.pivot_speed),
            ("camera.min_pitch", c.min_pitch),
            ("camera.max_pitch", c.max_pitch),
            ("camera.pivot_offset.x", c.pivot_offset.x),
            ("camera.pivot_offset.y", c.pivot_offset.y),
            ("camera.pivot_offset.z", c.pivot_offset.z),
            ("camera.default_boom_length", c.default_boom_length),
            ("camera.collision_radius", c.collision_radius),
            ("camera.collision_offset", c.collision_offset),
            ("camera.min_collision_offset", c.min_collision_offset),
            ("camera.boom_smoothing", c.boom_smoothing),
            ("animation.damp_time", a.damp_time),
            ("animation.snap_threshold", a.snap_threshold),
            ("time.time_scale", t.time_scale),
            ("time.fixed_timestep", t.fixed_timestep),
            ("time.max_delta_time", t.max_delta_time),
        ]
    }

    /// Check every constraint the controller relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN would slip through every ordered comparison below
        for (field, value) in self.float_fields() {
            require(value.is_finite(), field, "must be a finite number")?;
        }

        let m = &self.movement;
        require(m.walk_speed >= 0.0, "movement.walk_speed", "must not be negative")?;
        require(m.sprint_speed >= 0.0, "movement.sprint_speed", "must not be negative")?;
        require(m.rotation_speed >= 0.0, "movement.rotation_speed", "must not be negative")?;
        require(m.jump_height >= 0.0, "movement.jump_height", "must not be negative")?;
        require(m.gravity < 0.0, "movement.gravity", "must point down (negative)")?;

        let g = &self.ground;
        require(g.height_offset >= 0.0, "ground.height_offset", "must not be negative")?;
        require(g.grounded_radius > 0.0, "ground.grounded_radius", "must be positive")?;
        require(g.grounded_distance > 0.0, "ground.grounded_distance", "must be positive")?;
        require(g.landing_radius > 0.0, "ground.landing_radius", "must be positive")?;
        require(g.landing_distance > 0.0, "ground.landing_distance", "must be positive")?;

        let c = &self.camera;
        if c.min_pitch > c.max_pitch {
            return Err(ConfigError::invalid(
                "camera.min_pitch",
                format!("{} exceeds max_pitch {}", c.min_pitch, c.max_pitch),
            ));
        }
        require(c.follow_smooth_time > 0.0, "camera.follow_smooth_time", "must be positive")?;
        require(
            c.default_boom_length < 0.0,
            "camera.default_boom_length",
            "must be negative (camera behind the pivot)",
        )?;
        require(c.collision_radius > 0.0, "camera.collision_radius", "must be positive")?;
        require(c.collision_offset >= 0.0, "camera.collision_offset", "must not be negative")?;
        require(
            c.min_collision_offset >= 0.0,
            "camera.min_collision_offset",
            "must not be negative",
        )?;
        require(
            (0.0..=1.0).contains(&c.boom_smoothing),
            "camera.boom_smoothing",
            "must be within [0, 1]",
        )?;

        let a = &self.animation;
        require(a.damp_time > 0.0, "animation.damp_time", "must be positive")?;
        require(
            a.snap_threshold > 0.0 && a.snap_threshold < 1.0,
            "animation.snap_threshold",
            "must be within (0, 1)",
        )?;

        let t = &self.time;
        require(t.fixed_timestep > 0.0, "time.fixed_timestep", "must be positive")?;
        require(t.max_delta_time > 0.0, "time.max_delta_time", "must be positive")?;
        require(t.time_scale >= 0.0, "time.time_scale", "must not be negative")?;

        Ok(())
    }
}
