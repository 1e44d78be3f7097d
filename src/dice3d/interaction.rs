//! Pointer hover, click selection and the roll command.

use bevy::log::info;
use bevy::math::{Vec2, Vec3};
use rand::Rng;

use crate::dice3d::context::RollCommand;
use crate::dice3d::physics::PhysicsWorld;
use crate::dice3d::scene::SceneGraph;
use crate::dice3d::types::{
    CameraRig, EntityId, EntityKind, HighlightPass, HoverState, Registry, SelectionSet, Viewport,
};

/// Recompute the hovered entity from scratch for a pointer at `ndc`.
///
/// The nearest hit wins. A table hit or no hit clears hover and disables the
/// hover pass; any other hit becomes the only hovered entity.
pub fn resolve_hover(
    ndc: Vec2,
    camera: &CameraRig,
    scene: &SceneGraph,
    registry: &Registry,
    hover: &mut HoverState,
    pass: &mut HighlightPass,
) -> Option<EntityId> {
    let ray = camera.ray_from_ndc(ndc);
    let hit = scene
        .pick(&ray)
        .and_then(|hit| registry.find_by_visual(hit.visual))
        .filter(|id| registry.kind(*id) != Some(EntityKind::Table));

    match hit {
        Some(id) => {
            hover.hovered = Some(id);
            pass.objects = vec![id];
            pass.enabled = true;
        }
        None => {
            hover.hovered = None;
            pass.enabled = false;
        }
    }
    hit
}

/// Primary-button press. Hovering adds the hovered die to the selection;
/// clicking empty space clears the whole selection.
pub fn handle_primary_click(hover: &HoverState, selection: &mut SelectionSet, pass: &mut HighlightPass) {
    match hover.hovered {
        Some(id) => {
            if !selection.insert(id) {
                info!("Die {} already selected", id);
            }
            pass.objects = selection.as_slice().to_vec();
            pass.enabled = true;
        }
        None => {
            selection.clear();
            pass.objects.clear();
            pass.enabled = false;
        }
    }
}

/// Throw every selected die: the same linear velocity for all, and a spin
/// drawn per die with each component uniform in `[-spin, spin]`.
/// Returns the dice that were thrown, in selection order.
pub fn roll_selected<P: PhysicsWorld + ?Sized, R: Rng>(
    selection: &SelectionSet,
    registry: &Registry,
    physics: &mut P,
    roll: &RollCommand,
    rng: &mut R,
) -> Vec<EntityId> {
    let mut thrown = Vec::with_capacity(selection.len());
    for id in selection.iter() {
        let Some(entity) = registry.get(id) else {
            continue;
        };

        let spin = Vec3::new(
            rng.gen_range(-roll.spin..=roll.spin),
            rng.gen_range(-roll.spin..=roll.spin),
            rng.gen_range(-roll.spin..=roll.spin),
        );
        physics.set_linear_velocity(entity.body, roll.linear_velocity);
        physics.set_angular_velocity(entity.body, spin);
        thrown.push(id);
    }

    if !thrown.is_empty() {
        info!("Rolling {} dice", thrown.len());
    }
    thrown
}

/// New viewport size: the camera aspect follows it. Zero-sized viewports are
/// ignored. Returns whether anything changed.
pub fn apply_resize(camera: &mut CameraRig, viewport: &mut Viewport, width: f32, height: f32) -> bool {
    if width <= 0.0 || height <= 0.0 {
        return false;
    }
    *viewport = Viewport::new(width, height);
    camera.aspect = viewport.aspect();
    true
}
