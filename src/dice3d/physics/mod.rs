//! Rigid-body physics behind a small trait.
//!
//! The frame loop only needs to add bodies, step, read poses back and set
//! velocities, so that is all [`PhysicsWorld`] exposes. [`RapierWorld`] is
//! the production backend.

mod rapier_world;
mod stepper;

pub use rapier_world::RapierWorld;
pub use stepper::PhysicsStepper;

use bevy::math::Vec3;

use crate::dice3d::types::{BodyHandle, Pose};

/// Box-shaped body to create. A mass of zero makes the body fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub position: Vec3,
    pub half_extents: Vec3,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl BodyDesc {
    pub fn is_fixed(&self) -> bool {
        self.mass <= 0.0
    }
}

pub trait PhysicsWorld: Send + Sync + 'static {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Advance exactly one internal step of `dt` seconds.
    fn step_fixed(&mut self, dt: f32);

    /// Current world pose, or `None` when the body has no motion state.
    fn motion_state(&self, body: BodyHandle) -> Option<Pose>;

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3);

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3);

    /// Keep the body awake no matter how slowly it moves.
    fn disable_deactivation(&mut self, body: BodyHandle);
}
