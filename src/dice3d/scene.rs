//! Renderer-side scene graph
//!
//! Holds the pose the player sees for every node, which can differ from the
//! simulated pose (see [`crate::dice3d::sync`]). Picking runs against these
//! visual poses, exactly like a mesh raycast would.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::math::{Dir3, Quat, Ray3d, Vec3};
use bevy::prelude::Component;

use crate::dice3d::types::{Pose, VisualHandle};

/// Links a Bevy entity to the scene-graph node it mirrors.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualLink(pub VisualHandle);

/// A box-shaped visual node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualNode {
    pub pose: Pose,
    pub half_extents: Vec3,
}

/// Nearest intersection returned by [`SceneGraph::pick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub visual: VisualHandle,
    pub distance: f32,
}

#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: Vec<VisualNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, pose: Pose, half_extents: Vec3) -> VisualHandle {
        self.nodes.push(VisualNode { pose, half_extents });
        VisualHandle(self.nodes.len() - 1)
    }

    pub fn node(&self, handle: VisualHandle) -> Option<&VisualNode> {
        self.nodes.get(handle.0)
    }

    pub fn pose(&self, handle: VisualHandle) -> Option<Pose> {
        self.node(handle).map(|n| n.pose)
    }

    pub fn set_position(&mut self, handle: VisualHandle, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(handle.0) {
            node.pose.position = position;
        }
    }

    pub fn set_orientation(&mut self, handle: VisualHandle, orientation: Quat) {
        if let Some(node) = self.nodes.get_mut(handle.0) {
            node.pose.orientation = orientation;
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisualHandle, &VisualNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (VisualHandle(i), n))
    }

    /// Nearest node hit by `ray`. Only front faces count, so a ray starting
    /// inside a box does not hit that box. Ties go to the node added first.
    pub fn pick(&self, ray: &Ray3d) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for (visual, node) in self.iter() {
            let Some(distance) = intersect_box(ray, node) else {
                continue;
            };
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(RayHit { visual, distance });
            }
        }
        nearest
    }
}

/// Distance along `ray` to the box surface, tested in the box's local frame.
/// A ray starting inside the box sees no front face and misses.
fn intersect_box(ray: &Ray3d, node: &VisualNode) -> Option<f32> {
    let inverse = node.pose.orientation.inverse();
    let origin = inverse * (ray.origin - node.pose.position);
    if origin.abs().cmplt(node.half_extents).all() {
        return None;
    }

    let direction = Dir3::new(inverse * *ray.direction).ok()?;
    let local = Ray3d::new(origin, direction);
    let aabb = Aabb3d::new(Vec3::ZERO, node.half_extents);
    RayCast3d::from_ray(local, f32::MAX).aabb_intersection_at(&aabb)
}
