//! Strider - headless third-person character controller demo
//!
//! Builds a small rapier world, drives a scripted input sequence through the
//! controller's phased tick and logs the resulting character and camera state.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::{Vec2, Vec3};
use strider_game::{
    AnimatorParameters, CharacterController, InputFrame, InputSource, MovementIntent,
};
use strider_physics::{CharacterBodyConfig, PhysicsConfig, PhysicsWorld};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use settings::Settings;

/// Headless third-person controller demo
#[derive(Debug, Parser)]
#[command(name = "strider", version)]
struct Args {
    /// Log at DEBUG instead of INFO
    #[arg(short, long)]
    verbose: bool,
    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write the effective settings back after loading
    #[arg(long)]
    save: bool,
}

/// Walk, jump, sprint while turning, then stand still
struct DemoInput {
    frame: u32,
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> InputFrame {
        let frame = self.frame;
        self.frame += 1;

        match frame {
            0..=59 => InputFrame {
                movement: MovementIntent::new(0.0, 1.0, false),
                ..Default::default()
            },
            60 => InputFrame {
                movement: MovementIntent::new(0.0, 1.0, false),
                jump_requested: true,
                ..Default::default()
            },
            61..=149 => InputFrame {
                movement: MovementIntent::new(0.3, 0.8, frame >= 120),
                camera: Vec2::new(0.5, 0.1),
                ..Default::default()
            },
            _ => InputFrame::default(),
        }
    }
}

fn build_world(settings: &Settings) -> PhysicsWorld {
    let mut world = PhysicsWorld::with_config(PhysicsConfig {
        gravity: Vec3::new(0.0, settings.controller.movement.gravity, 0.0),
        timestep: settings.controller.time.fixed_timestep,
    });

    // Floor with its top at y = 0
    world.create_static_box(Vec3::new(100.0, 0.5, 100.0), Vec3::new(0.0, -0.5, 0.0));
    // Wall behind the start so the camera boom has something to hit
    world.create_static_box(Vec3::new(6.0, 3.0, 0.2), Vec3::new(0.0, 3.0, 2.0));
    world
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting Strider demo...");

    let settings = Settings::load(args.config.as_deref());
    if args.save {
        settings
            .save(args.config.as_deref())
            .context("Failed to save settings")?;
    }

    let mut world = build_world(&settings);
    let body = world.spawn_character(&CharacterBodyConfig::default(), Vec3::ZERO);
    world.update_query_pipeline();

    let mut controller = CharacterController::builder()
        .config(settings.controller.clone())
        .input(DemoInput { frame: 0 })
        .physics(world)
        .animator(AnimatorParameters::new())
        .body(body)
        .build()
        .context("Failed to build character controller")?;

    let demo = &settings.demo;
    let log_every = demo.log_every.max(1);
    for frame in 0..demo.frames {
        controller.run_frame(demo.frame_time, |world, _| world.step());

        for cue in controller.animator_mut().drain_cues() {
            info!("frame {frame}: cue {}", cue.name());
        }

        if frame % log_every == 0 {
            let state = controller.locomotion().state();
            let heading = state.transform().forward();
            let camera = controller.camera();
            info!(
                "frame {frame}: {:?} pos=({:.2}, {:.2}, {:.2}) heading=({:.2}, {:.2}) air={:.2}s yaw={:.1} pitch={:.1} boom={:.2}",
                controller.locomotion().phase(),
                state.position.x,
                state.position.y,
                state.position.z,
                heading.x,
                heading.z,
                state.air_time,
                camera.state().yaw,
                camera.state().pitch,
                camera.state().boom_length,
            );
        }
    }

    let state = controller.locomotion().state();
    let camera = controller.camera().camera_transform();
    info!(
        "Finished {} frames ({:.2}s simulated), character at {:?}, camera at {:?}",
        controller.clock().frame_count,
        controller.clock().total_time,
        state.position,
        camera.position
    );

    Ok(())
}
