//! Strider Physics - Physics probe service using rapier3d
//!
//! Provides the `PhysicsProbe` seam the character controller talks to, and a
//! rapier-backed world implementing it.

mod body;
mod probe;

pub use body::CharacterBodyConfig;
pub use probe::{PhysicsProbe, ShapeHit, CHARACTER_LAYER, WORLD_LAYER};

use glam::Vec3;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;
use tracing::warn;

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -15 on Y axis)
    pub gravity: Vec3,
    /// Seconds advanced by one [`PhysicsWorld::step`]
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -15.0, 0.0),
            timestep: 1.0 / 50.0,
        }
    }
}

/// Rapier simulation plus the query pipeline the probes read
pub struct PhysicsWorld {
    /// Gravity and step size
    pub config: PhysicsConfig,
    /// Character bodies and any other dynamic bodies
    bodies: RigidBodySet,
    /// Static geometry plus colliders attached to bodies
    colliders: ColliderSet,
    /// Unused by the controller, required by the pipeline
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    /// Solver parameters, `dt` taken from the config
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    /// Acceleration structure behind every shape cast
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty world with default gravity and timestep
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create an empty world with custom gravity and timestep
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Integrate one timestep and refresh the query pipeline
    pub fn step(&mut self) {
        let g = self.config.gravity;

        self.pipeline.step(
            &vector![g.x, g.y, g.z],
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.query_pipeline.update(&self.colliders);
    }

    /// Rebuild the query acceleration structure without stepping.
    ///
    /// Needed after inserting colliders when probes run before the first step.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.colliders);
    }

    /// Insert a collider with no parent body (walls, floors)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.colliders.insert(collider)
    }

    /// Insert a body and attach `collider` to it
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self.bodies.insert(rigid_body);
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);
        (body, collider)
    }

    /// Remove a body and its attached colliders.
    ///
    /// Later probes and velocity writes on the handle fail soft.
    pub fn remove_body(&mut self, body: RigidBodyHandle) {
        self.bodies.remove(
            body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Static walkable box on [`WORLD_LAYER`]
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsProbe for PhysicsWorld {
    type Body = RigidBodyHandle;

    fn cast_shape(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        layers: u32,
    ) -> Option<ShapeHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || radius <= 0.0 || max_distance <= 0.0 {
            return None;
        }

        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(origin.x, origin.y, origin.z);
        let shape_vel = vector![direction.x, direction.y, direction.z];
        let filter = QueryFilter::default().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(layers),
        ));

        self.query_pipeline
            .cast_shape(
                &self.bodies,
                &self.colliders,
                &shape_pos,
                &shape_vel,
                &shape,
                ShapeCastOptions::with_max_time_of_impact(max_distance),
                filter,
            )
            .map(|(_handle, hit)| ShapeHit {
                point: origin + direction * hit.time_of_impact,
                distance: hit.time_of_impact,
            })
    }

    fn velocity(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.bodies
            .get(body)
            .map(|rb| Vec3::new(rb.linvel().x, rb.linvel().y, rb.linvel().z))
    }

    fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Vec3) {
        match self.bodies.get_mut(body) {
            Some(rb) => rb.set_linvel(vector![velocity.x, velocity.y, velocity.z], true),
            None => warn!("set_velocity on unknown body {:?}", body),
        }
    }

    fn position(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(body).map(|rb| {
            let t = rb.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }
}
