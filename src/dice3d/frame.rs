//! The per-frame driver: input, physics, sync, settle tracking.

use bevy::input::keyboard::KeyCode;
use bevy::log::{debug, info};

use crate::dice3d::context::SimulationContext;
use crate::dice3d::interaction::{apply_resize, handle_primary_click, resolve_hover, roll_selected};
use crate::dice3d::physics::PhysicsWorld;
use crate::dice3d::sync::sync_transforms;
use crate::dice3d::types::{
    top_face, EntityId, InputEvent, InputQueue, RollOutcome, SETTLE_SPEED,
};

/// What happened during one [`FrameDriver::tick`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    pub events_handled: usize,
    pub substeps: u32,
    pub rolled: Vec<EntityId>,
    pub settled: Option<RollOutcome>,
}

pub struct FrameDriver;

impl FrameDriver {
    /// Key that throws the selected dice.
    pub const ROLL_KEY: KeyCode = KeyCode::Space;

    /// Run one frame against `ctx`. Queued input is handled first, in order,
    /// then physics steps and the scene graph is synced.
    pub fn tick<P: PhysicsWorld>(
        ctx: &mut SimulationContext<P>,
        queue: &mut InputQueue,
        delta: f32,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        for event in queue.drain() {
            report.events_handled += 1;
            if let Some(rolled) = Self::dispatch(ctx, event) {
                report.rolled = rolled;
            }
        }

        ctx.controls.update(&mut ctx.camera);

        report.substeps = ctx.stepper.step(&mut ctx.physics, delta);
        sync_transforms(&ctx.physics, &ctx.registry, &mut ctx.scene, ctx.clamp_height);

        report.settled = Self::track_settle(ctx, delta);
        report
    }

    /// Handle one input event. Returns the thrown dice for a roll.
    pub fn dispatch<P: PhysicsWorld>(
        ctx: &mut SimulationContext<P>,
        event: InputEvent,
    ) -> Option<Vec<EntityId>> {
        match event {
            InputEvent::PointerMoved { position } => {
                let ndc = ctx.viewport.to_ndc(position);
                resolve_hover(
                    ndc,
                    &ctx.camera,
                    &ctx.scene,
                    &ctx.registry,
                    &mut ctx.hover,
                    &mut ctx.highlights.hover,
                );
            }
            InputEvent::PrimaryPressed => {
                handle_primary_click(&ctx.hover, &mut ctx.selection, &mut ctx.highlights.selected);
            }
            InputEvent::KeyPressed(key) if key == Self::ROLL_KEY => {
                let thrown = roll_selected(
                    &ctx.selection,
                    &ctx.registry,
                    &mut ctx.physics,
                    &ctx.roll,
                    &mut ctx.rng,
                );
                if !thrown.is_empty() {
                    ctx.tracker.start(thrown.clone());
                    return Some(thrown);
                }
            }
            InputEvent::KeyPressed(_) => {}
            InputEvent::Resized { width, height } => {
                if !apply_resize(&mut ctx.camera, &mut ctx.viewport, width, height) {
                    debug!("ignoring resize to {}x{}", width, height);
                }
            }
            InputEvent::Orbit { delta } => ctx.controls.rotate(delta, &ctx.viewport),
            InputEvent::Zoom { lines } => ctx.controls.zoom(lines),
        }
        None
    }

    fn track_settle<P: PhysicsWorld>(
        ctx: &mut SimulationContext<P>,
        delta: f32,
    ) -> Option<RollOutcome> {
        if !ctx.tracker.is_rolling() {
            return None;
        }

        let all_still = ctx.tracker.rolling().iter().all(|id| {
            let Some(entity) = ctx.registry.get(*id) else {
                return true;
            };
            let linear = ctx.physics.linear_velocity(entity.body).unwrap_or_default();
            let angular = ctx.physics.angular_velocity(entity.body).unwrap_or_default();
            linear.length() < SETTLE_SPEED && angular.length() < SETTLE_SPEED
        });

        let settled = ctx.tracker.advance(all_still, delta)?;
        let faces = settled
            .into_iter()
            .filter_map(|id| ctx.body_pose(id).map(|pose| (id, top_face(pose.orientation))))
            .collect();
        let outcome = RollOutcome { faces };
        info!("Dice settled: {}", outcome.describe());
        ctx.tracker.last_outcome = Some(outcome.clone());
        Some(outcome)
    }
}
