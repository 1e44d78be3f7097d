//! Outline drawing for the hover and selected highlight passes.

use bevy::prelude::*;

use crate::dice3d::context::SimulationContext;
use crate::dice3d::types::HighlightPass;

/// Outlines sit slightly outside the box so they are not z-fighting with it.
const OUTLINE_SCALE: f32 = 1.04;

pub fn draw_highlights(ctx: Res<SimulationContext>, mut gizmos: Gizmos) {
    // Hover draws last so it stays visible on a selected die
    draw_pass(&ctx, &ctx.highlights.selected, &mut gizmos);
    draw_pass(&ctx, &ctx.highlights.hover, &mut gizmos);
}

fn draw_pass(ctx: &SimulationContext, pass: &HighlightPass, gizmos: &mut Gizmos) {
    for id in pass.visible_objects() {
        let Some(entity) = ctx.registry.get(*id) else {
            continue;
        };
        let Some(node) = ctx.scene.node(entity.visual) else {
            continue;
        };
        let transform = Transform::from_translation(node.pose.position)
            .with_rotation(node.pose.orientation)
            .with_scale(node.half_extents * 2.0 * OUTLINE_SCALE);
        gizmos.cuboid(transform, pass.color);
    }
}
