//! Bridges the Bevy schedule to the simulation frame driver.

use bevy::prelude::*;

use crate::dice3d::context::SimulationContext;
use crate::dice3d::frame::FrameDriver;
use crate::dice3d::scene::VisualLink;
use crate::dice3d::types::InputQueue;

/// Run one simulation frame with the real frame delta.
pub fn drive_frame(
    time: Res<Time>,
    mut ctx: ResMut<SimulationContext>,
    mut queue: ResMut<InputQueue>,
) {
    let report = FrameDriver::tick(&mut *ctx, &mut *queue, time.delta_secs());
    if !report.rolled.is_empty() {
        debug!(
            "frame rolled {} dice over {} substeps",
            report.rolled.len(),
            report.substeps
        );
    }
}

/// Copy scene graph poses onto the linked render entities.
pub fn mirror_visuals(
    ctx: Res<SimulationContext>,
    mut visuals: Query<(&VisualLink, &mut Transform)>,
) {
    for (link, mut transform) in visuals.iter_mut() {
        if let Some(pose) = ctx.scene.pose(link.0) {
            transform.translation = pose.position;
            transform.rotation = pose.orientation;
        }
    }
}
