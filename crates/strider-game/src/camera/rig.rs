//! Third-person camera rig with follow, look and collision

use glam::{Quat, Vec2, Vec3};
use strider_core::{frame_lerp_factor, smooth_damp_vec3, Transform};
use strider_physics::PhysicsProbe;
use tracing::{debug, trace};

use super::CameraConfig;

/// Camera-space axes used for camera-relative movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Look direction including pitch
    pub forward: Vec3,
    /// Horizontal, unaffected by pitch
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

/// Mutable rig state, advanced once per late tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Accumulated yaw in degrees, unbounded
    pub yaw: f32,
    /// Pitch in degrees, always within the configured bounds
    pub pitch: f32,
    /// Smoothed rig position
    pub follow_position: Vec3,
    /// Current signed boom length (negative = behind the pivot)
    pub boom_length: f32,
}

/// Camera rig following a target
///
/// The rig body carries yaw; a child pivot carries pitch; the camera sits on
/// the pivot's forward axis at `boom_length`.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    state: CameraState,
    follow_velocity: Vec3,
    target_boom_length: f32,
    obstructed: bool,
}

impl CameraRig {
    /// Create a rig resting at `position`
    pub fn new(config: CameraConfig, position: Vec3) -> Self {
        // Level unless the pitch range excludes it
        let pitch = 0.0_f32.max(config.min_pitch).min(config.max_pitch);
        let mut rig = Self {
            config,
            state: CameraState {
                yaw: 0.0,
                pitch,
                follow_position: position,
                boom_length: 0.0,
            },
            follow_velocity: Vec3::ZERO,
            target_boom_length: 0.0,
            obstructed: false,
        };
        rig.target_boom_length = rig.resolve_boom_target(None);
        rig.state.boom_length = rig.target_boom_length;
        rig
    }

    /// Get the tuning the rig was built with
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Get yaw, pitch, follow position and boom length
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Boom length the camera is currently gliding toward
    pub fn target_boom_length(&self) -> f32 {
        self.target_boom_length
    }

    /// Whether the last collision probe found an obstruction
    pub fn is_obstructed(&self) -> bool {
        self.obstructed
    }

    /// Yaw-only rotation of the rig body
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.state.yaw.to_radians())
    }

    /// Pitch rotation of the pivot relative to the body
    pub fn pivot_local_rotation(&self) -> Quat {
        Quat::from_rotation_x(-self.state.pitch.to_radians())
    }

    /// World rotation of the pivot (and the camera)
    pub fn pivot_rotation(&self) -> Quat {
        self.body_rotation() * self.pivot_local_rotation()
    }

    /// Yaw-only transform of the rig body at the follow point
    pub fn body_transform(&self) -> Transform {
        Transform::from_position_rotation(self.state.follow_position, self.body_rotation())
    }

    /// World position of the pivot the boom hangs from
    pub fn pivot_position(&self) -> Vec3 {
        self.body_transform().transform_point(self.config.pivot_offset)
    }

    /// World position of the camera at the current boom length
    pub fn camera_position(&self) -> Vec3 {
        self.pivot_position() + self.forward() * self.state.boom_length
    }

    /// World transform of the camera for the renderer
    pub fn camera_transform(&self) -> Transform {
        Transform::from_position_rotation(self.camera_position(), self.pivot_rotation())
    }

    /// Camera look direction
    pub fn forward(&self) -> Vec3 {
        Transform::from_position_rotation(Vec3::ZERO, self.pivot_rotation()).forward()
    }

    /// Camera right direction (horizontal)
    pub fn right(&self) -> Vec3 {
        self.body_transform().right()
    }

    /// Axes Locomotion moves along
    pub fn basis(&self) -> CameraBasis {
        CameraBasis {
            forward: self.forward(),
            right: self.right(),
        }
    }

    /// Run follow, rotate and collision in that order
    pub fn handle_all_camera_movement<P: PhysicsProbe>(
        &mut self,
        physics: &P,
        target: Vec3,
        look: Vec2,
        dt: f32,
    ) {
        self.follow_target(target, dt);
        self.rotate_camera(look);
        self.handle_camera_collisions(physics, dt);
    }

    /// Damp the rig position toward `target`
    pub fn follow_target(&mut self, target: Vec3, dt: f32) {
        self.state.follow_position = smooth_damp_vec3(
            self.state.follow_position,
            target,
            &mut self.follow_velocity,
            self.config.follow_smooth_time,
            dt,
        );
    }

    /// Accumulate yaw and clamped pitch from look input
    pub fn rotate_camera(&mut self, look: Vec2) {
        if !look.is_finite() {
            return;
        }
        self.state.yaw += look.x * self.config.look_speed;
        self.state.pitch -= look.y * self.config.pivot_speed;
        self.state.pitch = self
            .state
            .pitch
            .clamp(self.config.min_pitch, self.config.max_pitch);
    }

    /// Boom target for an optional obstruction distance from the pivot.
    ///
    /// The result is never positive and its magnitude is at least
    /// `min_collision_offset`.
    pub fn resolve_boom_target(&self, hit_distance: Option<f32>) -> f32 {
        let mut target = match hit_distance {
            Some(distance) => -(distance - self.config.collision_offset),
            None => self.config.default_boom_length,
        };

        // Keep the camera behind the pivot
        target = target.min(0.0);

        if target.abs() < self.config.min_collision_offset {
            target -= self.config.min_collision_offset;
        }
        target
    }

    /// Sweep from the pivot toward the resting camera position and glide the
    /// boom toward the resolved target. Returns the target.
    pub fn handle_camera_collisions<P: PhysicsProbe>(&mut self, physics: &P, dt: f32) -> f32 {
        let pivot = self.pivot_position();
        let resting = self.pivot_rotation() * Vec3::NEG_Z * self.config.default_boom_length;
        let direction = resting.normalize_or_zero();

        let hit_distance = physics
            .cast_shape(
                pivot,
                self.config.collision_radius,
                direction,
                self.config.default_boom_length.abs(),
                self.config.layers,
            )
            .map(|hit| hit.point.distance(pivot));

        let obstructed = hit_distance.is_some();
        if obstructed != self.obstructed {
            debug!(?hit_distance, "camera obstruction changed");
            self.obstructed = obstructed;
        }

        self.target_boom_length = self.resolve_boom_target(hit_distance);

        let t = frame_lerp_factor(self.config.boom_smoothing, dt);
        self.state.boom_length += (self.target_boom_length - self.state.boom_length) * t;

        trace!(
            boom = self.state.boom_length,
            target = self.target_boom_length,
            "camera boom"
        );
        self.target_boom_length
    }

    /// Set the yaw directly (degrees)
    pub fn set_yaw(&mut self, yaw: f32) {
        self.state.yaw = yaw;
    }

    /// Set the pitch directly (degrees), clamped to the configured bounds
    pub fn set_pitch(&mut self, pitch: f32) {
        self.state.pitch = pitch.clamp(self.config.min_pitch, self.config.max_pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_physics::ShapeHit;

    /// Probe that reports a fixed obstruction distance for every cast
    struct FixedProbe(Option<f32>);

    impl PhysicsProbe for FixedProbe {
        type Body = ();

        fn cast_shape(
            &self,
            origin: Vec3,
            _radius: f32,
            direction: Vec3,
            max_distance: f32,
            _layers: u32,
        ) -> Option<ShapeHit> {
            self.0.filter(|d| *d <= max_distance).map(|distance| ShapeHit {
                point: origin + direction.normalize_or_zero() * distance,
                distance,
            })
        }

        fn velocity(&self, _body: ()) -> Option<Vec3> {
            None
        }

        fn set_velocity(&mut self, _body: (), _velocity: Vec3) {}

        fn position(&self, _body: ()) -> Option<Vec3> {
            None
        }
    }

    fn rig() -> CameraRig {
        CameraRig::new(CameraConfig::default(), Vec3::ZERO)
    }

    #[test]
    fn test_camera_rig_creation() {
        let rig = rig();
        assert_eq!(rig.state().yaw, 0.0);
        assert_eq!(rig.state().pitch, 0.0);
        assert_eq!(rig.state().boom_length, -3.0);
        // Resting camera sits behind and above the target
        let camera = rig.camera_position();
        assert!((camera - Vec3::new(0.0, 1.6, 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_pitch_always_clamped() {
        let mut rig = rig();
        for _ in 0..1000 {
            rig.rotate_camera(Vec2::new(0.0, 1.0e6));
            assert!(rig.state().pitch >= -35.0 && rig.state().pitch <= 35.0);
        }
        assert_eq!(rig.state().pitch, -35.0);

        for i in 0..1000 {
            let y = if i % 3 == 0 { -1.0e9 } else { 7.5 };
            rig.rotate_camera(Vec2::new(3.0, y));
            assert!(rig.state().pitch >= -35.0 && rig.state().pitch <= 35.0);
        }

        rig.rotate_camera(Vec2::new(f32::NAN, f32::INFINITY));
        assert!(rig.state().pitch.is_finite());
    }

    #[test]
    fn test_initial_pitch_inside_range_without_level() {
        let config = CameraConfig {
            min_pitch: 10.0,
            max_pitch: 30.0,
            ..CameraConfig::default()
        };
        let rig = CameraRig::new(config, Vec3::ZERO);
        assert_eq!(rig.state().pitch, 10.0);

        let config = CameraConfig {
            min_pitch: -30.0,
            max_pitch: -10.0,
            ..CameraConfig::default()
        };
        let rig = CameraRig::new(config, Vec3::ZERO);
        assert_eq!(rig.state().pitch, -10.0);

        assert_eq!(self::rig().state().pitch, 0.0);
    }

    #[test]
    fn test_yaw_accumulates_unbounded() {
        let mut rig = rig();
        for _ in 0..200 {
            rig.rotate_camera(Vec2::new(1.0, 0.0));
        }
        assert!((rig.state().yaw - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_positive_yaw_turns_right() {
        let mut rig = rig();
        rig.set_yaw(90.0);
        assert!(rig.forward().distance(Vec3::X) < 1e-5);
        assert!(rig.right().distance(Vec3::Z) < 1e-5);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let mut rig = rig();
        rig.set_pitch(30.0);
        assert!(rig.forward().y < 0.0);
        // Pitch never leaks into the horizontal right axis
        assert!(rig.right().y.abs() < 1e-6);
    }

    #[test]
    fn test_boom_target_on_hit() {
        let rig = rig();
        // d = 2, c = 0.2
        assert!((rig.resolve_boom_target(Some(2.0)) + 1.8).abs() < 1e-6);
        // |-(0.35 - 0.2)| = 0.15 < 0.2, decremented by 0.2
        assert!((rig.resolve_boom_target(Some(0.35)) + 0.35).abs() < 1e-6);
        // Hit inside the offset never puts the camera in front of the pivot
        assert!((rig.resolve_boom_target(Some(0.05)) + 0.2).abs() < 1e-6);
        assert_eq!(rig.resolve_boom_target(None), -3.0);
    }

    #[test]
    fn test_boom_target_magnitude_never_below_minimum() {
        let rig = rig();
        for i in 0..=400 {
            let d = i as f32 * 0.01;
            let target = rig.resolve_boom_target(Some(d));
            assert!(target <= 0.0);
            assert!(target.abs() >= rig.config().min_collision_offset - 1e-6, "d={d} target={target}");
        }
    }

    #[test]
    fn test_collision_pulls_in_and_releases_out() {
        let mut rig = rig();
        let dt = 1.0 / 60.0;

        let wall = FixedProbe(Some(1.0));
        for _ in 0..300 {
            rig.handle_camera_collisions(&wall, dt);
        }
        assert!(rig.is_obstructed());
        assert!((rig.state().boom_length + 0.8).abs() < 1e-3);

        let open = FixedProbe(None);
        for _ in 0..300 {
            rig.handle_camera_collisions(&open, dt);
        }
        assert!(!rig.is_obstructed());
        assert!((rig.state().boom_length + 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_boom_glides_instead_of_snapping() {
        let mut rig = rig();
        rig.handle_camera_collisions(&FixedProbe(Some(1.0)), 1.0 / 60.0);
        let boom = rig.state().boom_length;
        assert!(boom < -0.8 && boom > -3.0);
    }

    #[test]
    fn test_zero_dt_update_is_idempotent() {
        let mut rig = rig();
        let probe = FixedProbe(Some(1.5));
        rig.handle_all_camera_movement(&probe, Vec3::new(2.0, 0.0, 1.0), Vec2::ZERO, 1.0 / 60.0);
        let before = *rig.state();

        rig.handle_all_camera_movement(&probe, Vec3::new(2.0, 0.0, 1.0), Vec2::ZERO, 0.0);
        rig.handle_all_camera_movement(&probe, Vec3::new(2.0, 0.0, 1.0), Vec2::ZERO, 0.0);
        let after = *rig.state();

        assert!(before.follow_position.distance(after.follow_position) < 1e-6);
        assert!((before.boom_length - after.boom_length).abs() < 1e-6);
        assert_eq!(before.yaw, after.yaw);
        assert_eq!(before.pitch, after.pitch);
    }

    #[test]
    fn test_follow_lags_then_settles() {
        let mut rig = rig();
        let target = Vec3::new(5.0, 0.0, 0.0);
        rig.follow_target(target, 1.0 / 60.0);
        assert!(rig.state().follow_position.x > 0.0);
        assert!(rig.state().follow_position.x < 5.0);

        for _ in 0..300 {
            rig.follow_target(target, 1.0 / 60.0);
        }
        assert!(rig.state().follow_position.distance(target) < 1e-2);
    }
}
