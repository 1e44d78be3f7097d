//! Rapier backend for [`PhysicsWorld`].

use bevy::log::debug;
use bevy::math::{Quat, Vec3};
use rapier3d::prelude::*;

use super::{BodyDesc, PhysicsWorld};
use crate::dice3d::types::{BodyHandle, Pose};

/// A Rapier world stepped by hand. Bodies are addressed by the order they
/// were added.
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    handles: Vec<RigidBodyHandle>,
    steps_taken: u64,
}

impl RapierWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: to_vector(gravity),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            handles: Vec::new(),
            steps_taken: 0,
        }
    }

    /// Number of fixed steps run since creation.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn body_count(&self) -> usize {
        self.handles.len()
    }

    fn body(&self, body: BodyHandle) -> Option<&RigidBody> {
        let handle = self.handles.get(body.0)?;
        self.bodies.get(*handle)
    }

    fn body_mut(&mut self, body: BodyHandle) -> Option<&mut RigidBody> {
        let handle = self.handles.get(body.0)?;
        self.bodies.get_mut(*handle)
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -9.8, 0.0))
    }
}

impl PhysicsWorld for RapierWorld {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let builder = if desc.is_fixed() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let rigid_body = builder.translation(to_vector(desc.position)).build();
        let handle = self.bodies.insert(rigid_body);

        let he = desc.half_extents;
        let mut collider = ColliderBuilder::cuboid(he.x, he.y, he.z)
            .friction(desc.friction)
            .restitution(desc.restitution);
        if !desc.is_fixed() {
            let volume = 8.0 * he.x * he.y * he.z;
            collider = collider.density(desc.mass / volume);
        }
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);

        self.handles.push(handle);
        debug!(
            "added {} body at {:?}",
            if desc.is_fixed() { "fixed" } else { "dynamic" },
            desc.position
        );
        BodyHandle(self.handles.len() - 1)
    }

    fn step_fixed(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
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
        self.steps_taken += 1;
    }

    fn motion_state(&self, body: BodyHandle) -> Option<Pose> {
        let rb = self.body(body)?;
        let t = rb.translation();
        let q = rb.rotation().coords;
        Some(Pose::new(
            Vec3::new(t.x, t.y, t.z),
            Quat::from_xyzw(q[0], q[1], q[2], q[3]),
        ))
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|rb| from_vector(rb.linvel()))
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|rb| from_vector(rb.angvel()))
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_linvel(to_vector(velocity), true);
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_angvel(to_vector(velocity), true);
        }
    }

    fn disable_deactivation(&mut self, body: BodyHandle) {
        if let Some(rb) = self.body_mut(body) {
            *rb.activation_mut() = RigidBodyActivation::cannot_sleep();
            rb.wake_up(true);
        }
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
