//! Camera-relative locomotion on a physics-driven body
//!
//! Each physics step runs ground probing, movement and rotation in that
//! order, then hands the frame's intent to the animation bridge. Jumps are
//! event-driven and only leave the ground from a grounded state.

use glam::{Quat, Vec3};
use strider_core::{horizontal_direction, yaw_rotation, Transform};
use strider_physics::PhysicsProbe;
use tracing::{debug, trace, warn};

use crate::animation::{AnimCue, AnimFlag, AnimationBackend, AnimationBridge, AnimationConfig};
use crate::camera::CameraBasis;
use crate::input::MovementIntent;

use super::{GroundProbeConfig, MovementConfig};

/// Locomotion state derived from the ground probe and jump flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionPhase {
    Grounded,
    Airborne,
    Jumping,
}

/// State owned by [`Locomotion`], mutated every physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionState {
    /// Body origin (feet)
    pub position: Vec3,
    /// Character facing
    pub facing: Quat,
    /// Last velocity written to or read from the body
    pub velocity: Vec3,
    /// Result of the last ground probe, cleared by a jump
    pub is_grounded: bool,
    /// Set by a jump, cleared on the next grounded step
    pub is_jumping: bool,
    /// Seconds since the last grounded step
    pub air_time: f32,
}

impl LocomotionState {
    fn at(position: Vec3) -> Self {
        Self {
            position,
            facing: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            is_grounded: true,
            is_jumping: false,
            air_time: 0.0,
        }
    }

    /// Position and facing as a transform
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.facing)
    }
}

/// Directional movement, facing and ground/jump state for one character
#[derive(Debug, Clone)]
pub struct Locomotion<B> {
    movement: MovementConfig,
    ground: GroundProbeConfig,
    body: B,
    state: LocomotionState,
    intent: MovementIntent,
    /// Horizontal velocity written by the last movement step
    move_direction: Vec3,
    /// Set once the Land cue fired for the current airborne stretch
    land_cue_fired: bool,
    bridge: AnimationBridge,
}

impl<B: Copy + std::fmt::Debug> Locomotion<B> {
    /// Create locomotion for `body`, grounded and idle at `position`.
    ///
    /// The state is not read back from the body until the first step.
    pub fn new(
        movement: MovementConfig,
        ground: GroundProbeConfig,
        animation: AnimationConfig,
        body: B,
        position: Vec3,
    ) -> Self {
        Self {
            movement,
            ground,
            body,
            state: LocomotionState::at(position),
            intent: MovementIntent::default(),
            move_direction: Vec3::ZERO,
            land_cue_fired: false,
            bridge: AnimationBridge::new(animation),
        }
    }

    /// Handle of the driven body
    pub fn body(&self) -> B {
        self.body
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Speeds and jump velocity
    pub fn movement_config(&self) -> &MovementConfig {
        &self.movement
    }

    /// Animator parameter writer
    pub fn bridge(&self) -> &AnimationBridge {
        &self.bridge
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    /// Replace the intent used by the next physics step
    pub fn set_intent(&mut self, intent: MovementIntent) {
        self.intent = intent;
    }

    /// Horizontal velocity chosen by the last movement step
    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.state.is_jumping
    }

    /// Overwrite the jump flag (the animation side owns it between steps)
    pub fn set_jumping(&mut self, jumping: bool) {
        self.state.is_jumping = jumping;
    }

    /// Seconds since the last grounded step
    pub fn air_time(&self) -> f32 {
        self.state.air_time
    }

    /// Coarse phase for logging and debug display
    pub fn phase(&self) -> LocomotionPhase {
        if self.state.is_jumping {
            LocomotionPhase::Jumping
        } else if self.state.is_grounded {
            LocomotionPhase::Grounded
        } else {
            LocomotionPhase::Airborne
        }
    }

    /// Full physics step: probe, move, rotate, then feed the animation bridge
    pub fn handle_all_movement<P, A>(
        &mut self,
        physics: &mut P,
        animator: &mut A,
        camera: CameraBasis,
        dt: f32,
    ) where
        P: PhysicsProbe<Body = B>,
        A: AnimationBackend,
    {
        if let Some(position) = physics.position(self.body) {
            self.state.position = position;
        }

        self.handle_fall_and_landing(physics, animator, dt);
        self.handle_movement(physics, camera);
        self.handle_rotation(camera, dt);

        let intent = self.intent;
        self.bridge.update_animator_values(animator, &intent, dt);
    }

    fn handle_fall_and_landing<P, A>(&mut self, physics: &P, animator: &mut A, dt: f32)
    where
        P: PhysicsProbe<Body = B>,
        A: AnimationBackend,
    {
        let origin = self.state.position + Vec3::Y * self.ground.height_offset;
        let vertical_velocity = physics.velocity(self.body).map_or(0.0, |v| v.y);
        // Still rising from our own jump: the ground we left does not count
        let ascending = self.state.is_jumping && vertical_velocity > 0.0;
        let was_grounded = self.state.is_grounded;

        if !was_grounded && !ascending && !self.land_cue_fired {
            let approaching = physics
                .cast_shape(
                    origin,
                    self.ground.landing_radius,
                    Vec3::NEG_Y,
                    self.ground.landing_distance,
                    self.ground.layers,
                )
                .is_some();
            if approaching {
                animator.play_cue(AnimCue::Land);
                self.land_cue_fired = true;
            }
        }

        let contact = physics
            .cast_shape(
                origin,
                self.ground.grounded_radius,
                Vec3::NEG_Y,
                self.ground.grounded_distance,
                self.ground.layers,
            )
            .is_some();
        let grounded = contact && !ascending;

        if grounded {
            if !was_grounded {
                if !self.land_cue_fired {
                    animator.play_cue(AnimCue::Land);
                }
                debug!(air_time = self.state.air_time, "landed");
            }
            self.state.air_time = 0.0;
            self.land_cue_fired = false;

            if self.state.is_jumping {
                self.state.is_jumping = false;
                animator.set_flag(AnimFlag::IsJumping, false);
            }
        } else {
            if was_grounded {
                debug!("left ground");
            }
            self.state.air_time += dt;
            if !ascending {
                animator.play_cue(AnimCue::Falling);
            }
        }

        self.state.is_grounded = grounded;
    }

    fn handle_movement<P>(&mut self, physics: &mut P, camera: CameraBasis)
    where
        P: PhysicsProbe<Body = B>,
    {
        let direction = horizontal_direction(
            camera.forward * self.intent.vertical + camera.right * self.intent.horizontal,
        );
        self.move_direction = direction * self.movement.max_speed(self.intent.sprinting);

        let Some(current) = physics.velocity(self.body) else {
            warn!("locomotion body {:?} missing from physics", self.body);
            return;
        };

        // Gravity and jump impulses live in the vertical component
        let velocity = Vec3::new(self.move_direction.x, current.y, self.move_direction.z);
        physics.set_velocity(self.body, velocity);
        self.state.velocity = velocity;
    }

    fn handle_rotation(&mut self, camera: CameraBasis, dt: f32) {
        let target_direction = camera.forward * self.intent.vertical + camera.right * self.intent.horizontal;
        let Some(target) = yaw_rotation(target_direction) else {
            return;
        };

        let t = (self.movement.rotation_speed * dt).clamp(0.0, 1.0);
        self.state.facing = self.state.facing.slerp(target, t).normalize();
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn handle_jumping<P, A>(&mut self, physics: &mut P, animator: &mut A) -> bool
    where
        P: PhysicsProbe<Body = B>,
        A: AnimationBackend,
    {
        if !self.state.is_grounded {
            trace!("jump ignored while airborne");
            return false;
        }

        animator.set_flag(AnimFlag::IsJumping, true);
        animator.play_cue(AnimCue::Jump);

        let jump_velocity = self.movement.jump_velocity();
        let velocity = Vec3::new(self.move_direction.x, jump_velocity, self.move_direction.z);
        physics.set_velocity(self.body, velocity);

        self.state.velocity = velocity;
        self.state.is_jumping = true;
        self.state.is_grounded = false;
        self.land_cue_fired = false;

        debug!(jump_velocity, "jumped");
        true
    }
}
