//! Character controller orchestration
//!
//! Owns the input, physics and animation services together with the
//! locomotion, camera and animation components, and runs them in a fixed
//! order each frame: read input, fixed-rate physics steps, then the late
//! phase (camera, then the jump/ground flag sync).

use glam::Vec2;
use strider_core::FrameClock;
use strider_physics::PhysicsProbe;
use tracing::{debug, info};

use crate::animation::{AnimFlag, AnimationBackend};
use crate::camera::CameraRig;
use crate::config::ControllerConfig;
use crate::error::SetupError;
use crate::input::{InputSource, MovementIntent};
use crate::player::Locomotion;

/// Third-person character controller driven by a host loop
pub struct CharacterController<I, P: PhysicsProbe, A> {
    config: ControllerConfig,
    input: I,
    physics: P,
    animator: A,
    locomotion: Locomotion<P::Body>,
    camera: CameraRig,
    clock: FrameClock,
    /// Look delta read this frame, consumed by the late phase
    look: Vec2,
}

impl<I, P, A> CharacterController<I, P, A>
where
    I: InputSource,
    P: PhysicsProbe,
    A: AnimationBackend,
{
    /// Start building a controller; see [`CharacterControllerBuilder`]
    pub fn builder() -> CharacterControllerBuilder<I, P, A> {
        CharacterControllerBuilder::new()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    /// Mutable access for the host's integration step and world edits
    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Mutable access for animation events driven by the host
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Mutable access for feeding window events to the input source
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn locomotion(&self) -> &Locomotion<P::Body> {
        &self.locomotion
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Mutable access to the clock, e.g. to change `config.time_scale`
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Read phase: take this frame's input snapshot
    pub fn poll_input(&mut self) {
        let frame = self.input.poll();
        self.update_movement_intent(frame.movement);
        self.look = frame.camera;

        if frame.jump_requested {
            self.request_jump();
        }
    }

    pub fn update_movement_intent(&mut self, intent: MovementIntent) {
        self.locomotion.set_intent(intent);
    }

    /// Jump now if grounded. Returns whether the jump happened.
    pub fn request_jump(&mut self) -> bool {
        self.locomotion.handle_jumping(&mut self.physics, &mut self.animator)
    }

    /// Fixed-rate phase: movement against the current camera basis
    pub fn tick_physics(&mut self, dt: f32) {
        let basis = self.camera.basis();
        self.locomotion
            .handle_all_movement(&mut self.physics, &mut self.animator, basis, dt);
    }

    /// Late phase: camera follow/look/collision, then flag sync
    pub fn tick_late(&mut self, dt: f32) {
        let target = self
            .physics
            .position(self.locomotion.body())
            .unwrap_or(self.locomotion.state().position);
        let look = std::mem::take(&mut self.look);
        self.camera
            .handle_all_camera_movement(&self.physics, target, look, dt);

        // Jump state is owned by the animation side, ground state by physics
        let jumping = self.animator.flag(AnimFlag::IsJumping);
        self.locomotion.set_jumping(jumping);
        self.animator
            .set_flag(AnimFlag::IsGrounded, self.locomotion.is_grounded());
    }

    /// Run one whole frame and return how many physics steps it took.
    ///
    /// `step_physics` integrates the physics world after each fixed
    /// locomotion step.
    pub fn run_frame(&mut self, raw_dt: f32, mut step_physics: impl FnMut(&mut P, f32)) -> u32 {
        self.clock.advance(raw_dt);
        self.poll_input();

        let steps = self.clock.fixed_steps();
        let fixed = self.clock.fixed_timestep();
        for _ in 0..steps {
            self.tick_physics(fixed);
            step_physics(&mut self.physics, fixed);
        }

        self.tick_late(self.clock.delta_time);
        steps
    }
}

/// Builder that wires services into a [`CharacterController`]
pub struct CharacterControllerBuilder<I, P: PhysicsProbe, A> {
    config: ControllerConfig,
    input: Option<I>,
    physics: Option<P>,
    animator: Option<A>,
    body: Option<P::Body>,
}

impl<I, P, A> CharacterControllerBuilder<I, P, A>
where
    I: InputSource,
    P: PhysicsProbe,
    A: AnimationBackend,
{
    pub fn new() -> Self {
        Self {
            config: ControllerConfig::default(),
            input: None,
            physics: None,
            animator: None,
            body: None,
        }
    }

    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input(mut self, input: I) -> Self {
        self.input = Some(input);
        self
    }

    pub fn physics(mut self, physics: P) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn animator(mut self, animator: A) -> Self {
        self.animator = Some(animator);
        self
    }

    /// The rigid body the controller moves
    pub fn body(mut self, body: P::Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Validate the config and assemble the controller.
    ///
    /// Fails with [`SetupError`] when the config is invalid or a
    /// service or the body was never supplied.
    pub fn build(self) -> Result<CharacterController<I, P, A>, SetupError> {
        self.config.validate()?;

        let input = self.input.ok_or(SetupError::MissingInput)?;
        let physics = self.physics.ok_or(SetupError::MissingPhysics)?;
        let animator = self.animator.ok_or(SetupError::MissingAnimator)?;
        let body = self.body.ok_or(SetupError::MissingBody)?;

        let position = physics
            .position(body)
            .ok_or_else(|| SetupError::UnknownBody(format!("{:?}", body)))?;

        let config = self.config;
        let locomotion = Locomotion::new(
            config.movement.clone(),
            config.ground.clone(),
            config.animation.clone(),
            body,
            position,
        );
        let camera = CameraRig::new(config.camera.clone(), position);
        let clock = FrameClock::new(config.time.clone());

        info!("Character controller ready at {:?}", position);
        debug!(?body, "controller body");

        Ok(CharacterController {
            config,
            input,
            physics,
            animator,
            locomotion,
            camera,
            clock,
            look: Vec2::ZERO,
        })
    }
}

impl<I, P, A> Default for CharacterControllerBuilder<I, P, A>
where
    I: InputSource,
    P: PhysicsProbe,
    A: AnimationBackend,
{
    fn default() -> Self {
        Self::new()
    }
}
