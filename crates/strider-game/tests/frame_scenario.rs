//! End-to-end frames against the rapier world

use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use strider_game::{
    AnimCue, AnimFlag, AnimationBackend, AnimatorParameters, CharacterController, InputFrame,
    InputSource, LocomotionPhase, MovementIntent,
};
use strider_physics::{CharacterBodyConfig, PhysicsWorld};

const FRAME: f32 = 0.02;

#[derive(Default)]
struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    /// Returned once the script runs out
    hold: InputFrame,
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or(self.hold)
    }
}

type Controller = CharacterController<ScriptedInput, PhysicsWorld, AnimatorParameters>;

fn build(world: PhysicsWorld, feet: Vec3) -> Controller {
    let mut world = world;
    let body = world.spawn_character(&CharacterBodyConfig::default(), feet);
    world.update_query_pipeline();

    Controller::builder()
        .input(ScriptedInput::default())
        .physics(world)
        .animator(AnimatorParameters::new())
        .body(body)
        .build()
        .unwrap()
}

fn flat_world() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.create_static_box(Vec3::new(50.0, 0.5, 50.0), Vec3::new(0.0, -0.5, 0.0));
    world
}

fn frame(controller: &mut Controller) {
    controller.run_frame(FRAME, |world, _| world.step());
}

#[test]
fn walks_forward_on_flat_ground() {
    let mut controller = build(flat_world(), Vec3::ZERO);
    controller.input_mut().hold = InputFrame {
        movement: MovementIntent::new(0.0, 1.0, false),
        ..Default::default()
    };

    for _ in 0..50 {
        frame(&mut controller);
    }

    let position = controller.locomotion().state().position;
    assert!(position.z < -1.0, "moved to {position:?}");
    assert!(position.x.abs() < 0.1);
    assert_eq!(controller.locomotion().phase(), LocomotionPhase::Grounded);
    assert!(controller.animator().flag(AnimFlag::IsGrounded));
}

#[test]
fn jump_leaves_ground_and_lands_once() {
    let mut controller = build(flat_world(), Vec3::ZERO);
    for _ in 0..5 {
        frame(&mut controller);
    }
    controller.animator_mut().drain_cues();

    controller.input_mut().frames.push_back(InputFrame {
        jump_requested: true,
        ..Default::default()
    });

    let mut cues = Vec::new();
    let mut apex: f32 = 0.0;
    let mut was_airborne = false;
    for _ in 0..150 {
        frame(&mut controller);
        cues.extend(controller.animator_mut().drain_cues());
        let state = controller.locomotion().state();
        apex = apex.max(state.position.y);
        assert!(!(state.is_grounded && state.is_jumping));
        was_airborne |= !state.is_grounded;
    }

    assert!(was_airborne);
    assert!(apex > 2.0, "apex {apex}");
    assert!(controller.locomotion().is_grounded());
    assert!(!controller.locomotion().is_jumping());
    assert!(!controller.animator().flag(AnimFlag::IsJumping));
    assert_eq!(cues.iter().filter(|c| **c == AnimCue::Jump).count(), 1);
    assert_eq!(cues.iter().filter(|c| **c == AnimCue::Land).count(), 1);
}

#[test]
fn walking_off_a_ledge_falls_and_lands() {
    let mut world = PhysicsWorld::new();
    // Small platform with its top at y = 0, lower floor at y = -3
    world.create_static_box(Vec3::new(2.0, 0.5, 2.0), Vec3::new(0.0, -0.5, 0.0));
    world.create_static_box(Vec3::new(50.0, 0.5, 50.0), Vec3::new(0.0, -3.5, 0.0));

    let mut controller = build(world, Vec3::ZERO);
    controller.input_mut().hold = InputFrame {
        movement: MovementIntent::new(0.0, 1.0, true),
        ..Default::default()
    };

    let mut cues = Vec::new();
    let mut max_air_time: f32 = 0.0;
    for _ in 0..150 {
        frame(&mut controller);
        cues.extend(controller.animator_mut().drain_cues());
        max_air_time = max_air_time.max(controller.locomotion().air_time());
    }

    assert!(max_air_time > 0.2);
    assert!(cues.contains(&AnimCue::Falling));
    assert!(cues.contains(&AnimCue::Land));
    assert!(!cues.contains(&AnimCue::Jump));

    let state = controller.locomotion().state();
    assert!(state.is_grounded);
    assert_eq!(state.air_time, 0.0);
    assert!(state.position.y < -2.5);
}

#[test]
fn camera_boom_shortens_against_wall() {
    let mut world = flat_world();
    // Wall behind the character, front face at z = 1.4
    world.create_static_box(Vec3::new(5.0, 5.0, 0.1), Vec3::new(0.0, 0.0, 1.5));
    let mut controller = build(world, Vec3::ZERO);

    for _ in 0..200 {
        frame(&mut controller);
    }

    let camera = controller.camera();
    assert!(camera.is_obstructed());
    assert!((camera.target_boom_length() + 1.0).abs() < 0.05);
    assert!(camera.camera_position().z < 1.4);
    assert!(camera.state().boom_length > -1.5);
}

#[test]
fn look_input_keeps_pitch_in_bounds() {
    let mut controller = build(flat_world(), Vec3::ZERO);
    controller.input_mut().hold = InputFrame {
        camera: Vec2::new(3.0, 1000.0),
        ..Default::default()
    };

    for _ in 0..20 {
        frame(&mut controller);
        let pitch = controller.camera().state().pitch;
        assert!((-35.0..=35.0).contains(&pitch));
    }
    assert_eq!(controller.camera().state().pitch, -35.0);
}
