//! Camera system

use bevy::prelude::*;

use crate::dice3d::context::SimulationContext;
use crate::dice3d::types::*;

/// Place the render camera where the orbit rig says it is.
pub fn sync_camera(
    ctx: Res<SimulationContext>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    for mut transform in camera_query.iter_mut() {
        *transform = ctx.camera.transform();
    }
}
