//! World-space pose shared by the physics backend and the scene graph.

use bevy::math::{Quat, Vec3};

/// Position plus unit-quaternion orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Map a point from this pose's local frame into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }

    /// Map a world-space point into this pose's local frame.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.orientation.inverse() * (world - self.position)
    }
}
