//! The physics probe service consumed by the character controller

use glam::Vec3;

/// Layer bit for walkable/static world geometry
pub const WORLD_LAYER: u32 = 1 << 0;
/// Layer bit for character bodies
pub const CHARACTER_LAYER: u32 = 1 << 1;

/// Result of a shape cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Centre of the cast shape at the moment of impact
    pub point: Vec3,
    /// Distance travelled along the cast direction before impact
    pub distance: f32,
}

/// Narrow interface to the collision and rigid-body backend.
///
/// Probes fail soft: anything the backend cannot answer is reported as
/// "no hit" or `None`, never as an error.
pub trait PhysicsProbe {
    /// Handle identifying a rigid body in this backend
    type Body: Copy + std::fmt::Debug;

    /// Sweep a sphere of `radius` from `origin` along `direction`.
    ///
    /// `direction` need not be normalized; a zero direction never hits.
    /// Only geometry whose membership intersects `layers` is considered.
    fn cast_shape(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        layers: u32,
    ) -> Option<ShapeHit>;

    /// Linear velocity of a body, `None` if the body is unknown
    fn velocity(&self, body: Self::Body) -> Option<Vec3>;

    /// Overwrite the linear velocity of a body. Unknown bodies are ignored.
    fn set_velocity(&mut self, body: Self::Body, velocity: Vec3);

    /// World position of a body's origin, `None` if the body is unknown
    fn position(&self, body: Self::Body) -> Option<Vec3>;
}
