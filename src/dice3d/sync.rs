//! Physics → scene graph transform sync.

use crate::dice3d::physics::PhysicsWorld;
use crate::dice3d::scene::SceneGraph;
use crate::dice3d::types::Registry;

/// Copy every body's pose onto its visual node.
///
/// Orientation is always copied. Position is copied only while the body is at
/// or below `clamp_height`; above it the node keeps its last shown position
/// while the body keeps simulating. Bodies without a motion state are skipped
/// for the frame. Returns how many entities were synced.
pub fn sync_transforms<P: PhysicsWorld + ?Sized>(
    physics: &P,
    registry: &Registry,
    scene: &mut SceneGraph,
    clamp_height: f32,
) -> usize {
    let mut synced = 0;
    for (_, entity) in registry.iter() {
        let Some(pose) = physics.motion_state(entity.body) else {
            continue;
        };

        if pose.position.y <= clamp_height {
            scene.set_position(entity.visual, pose.position);
        }
        scene.set_orientation(entity.visual, pose.orientation);
        synced += 1;
    }
    synced
}
