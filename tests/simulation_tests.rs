//! Frame driver tests against a scripted physics world.

use bevy::ecs::entity::Entity;
use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::math::{Quat, Vec2, Vec3};
use bevy::prelude::MouseButton;
use bevy::window::{CursorMoved, WindowEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tabletop_dice::dice3d::{
    queue_window_event, BodyDesc, BodyHandle, DiceRollerSettings, EntityId, FrameDriver,
    InputEvent, InputQueue, PhysicsWorld, Pose, SimulationContext,
};

#[derive(Debug, Clone)]
struct ScriptedBody {
    pose: Option<Pose>,
    linear: Vec3,
    angular: Vec3,
    always_awake: bool,
}

/// Bodies never move on their own; tests move them by hand.
#[derive(Debug, Default)]
struct ScriptedWorld {
    bodies: Vec<ScriptedBody>,
    steps: u32,
    velocity_writes: usize,
}

impl PhysicsWorld for ScriptedWorld {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        self.bodies.push(ScriptedBody {
            pose: Some(Pose::from_position(desc.position)),
            linear: Vec3::ZERO,
            angular: Vec3::ZERO,
            always_awake: false,
        });
        BodyHandle(self.bodies.len() - 1)
    }

    fn step_fixed(&mut self, _dt: f32) {
        self.steps += 1;
    }

    fn motion_state(&self, body: BodyHandle) -> Option<Pose> {
        self.bodies.get(body.0).and_then(|b| b.pose)
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(body.0).map(|b| b.linear)
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(body.0).map(|b| b.angular)
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        self.velocity_writes += 1;
        if let Some(b) = self.bodies.get_mut(body.0) {
            b.linear = velocity;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        self.velocity_writes += 1;
        if let Some(b) = self.bodies.get_mut(body.0) {
            b.angular = velocity;
        }
    }

    fn disable_deactivation(&mut self, body: BodyHandle) {
        if let Some(b) = self.bodies.get_mut(body.0) {
            b.always_awake = true;
        }
    }
}

fn scripted_context(seed: u64) -> SimulationContext<ScriptedWorld> {
    let settings = DiceRollerSettings::default();
    let mut ctx = SimulationContext::with_physics(
        ScriptedWorld::default(),
        &settings,
        StdRng::seed_from_u64(seed),
    )
    .expect("default settings are valid");
    ctx.populate(&settings);
    ctx
}

/// Pixel position at which `point` appears on screen.
fn pixel_for(ctx: &SimulationContext<ScriptedWorld>, point: Vec3) -> Vec2 {
    let rig = &ctx.camera;
    let local = rig.transform().rotation.inverse() * (point - rig.position);
    let half_height = (rig.fov * 0.5).tan();
    let ndc = Vec2::new(
        local.x / -local.z / (half_height * rig.aspect),
        local.y / -local.z / half_height,
    );
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * ctx.viewport.width,
        (1.0 - ndc.y) * 0.5 * ctx.viewport.height,
    )
}

fn body_of(ctx: &SimulationContext<ScriptedWorld>, id: EntityId) -> usize {
    ctx.registry.get(id).expect("registered").body.0
}

fn run(ctx: &mut SimulationContext<ScriptedWorld>, events: Vec<InputEvent>, delta: f32) {
    let mut queue = InputQueue::default();
    for event in events {
        queue.push(event);
    }
    FrameDriver::tick(ctx, &mut queue, delta);
    assert!(queue.is_empty(), "tick drains the queue");
}

fn select_all_dice(ctx: &mut SimulationContext<ScriptedWorld>) {
    for die in ctx.dice() {
        let position = ctx.visual_pose(die).expect("visual").position;
        let pixel = pixel_for(ctx, position);
        run(
            ctx,
            vec![
                InputEvent::PointerMoved { position: pixel },
                InputEvent::PrimaryPressed,
            ],
            0.0,
        );
    }
}

#[test]
fn test_dice_are_kept_awake() {
    let ctx = scripted_context(1);
    for die in ctx.dice() {
        assert!(ctx.physics.bodies[body_of(&ctx, die)].always_awake);
    }
    let table = ctx.table().expect("table");
    assert!(!ctx.physics.bodies[body_of(&ctx, table)].always_awake);
}

#[test]
fn test_substeps_are_capped_at_ten() {
    let mut ctx = scripted_context(1);
    let mut queue = InputQueue::default();

    let report = FrameDriver::tick(&mut ctx, &mut queue, 1.0);
    assert_eq!(report.substeps, 10);
    assert_eq!(ctx.physics.steps, 10);

    // Time past the cap is not carried into the next frame
    let report = FrameDriver::tick(&mut ctx, &mut queue, 1.0 / 60.0);
    assert_eq!(report.substeps, 1);
    assert_eq!(ctx.physics.steps, 11);
}

#[test]
fn test_short_frames_accumulate() {
    let mut ctx = scripted_context(1);
    let mut queue = InputQueue::default();

    let first = FrameDriver::tick(&mut ctx, &mut queue, 0.01);
    let second = FrameDriver::tick(&mut ctx, &mut queue, 0.01);
    assert_eq!(first.substeps, 0);
    assert_eq!(second.substeps, 1);
}

#[test]
fn test_sync_copies_pose_below_clamp() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[0];
    let body = body_of(&ctx, die);
    let orientation = Quat::from_rotation_x(0.4);
    ctx.physics.bodies[body].pose = Some(Pose::new(Vec3::new(1.0, 3.0, -2.0), orientation));

    run(&mut ctx, vec![], 1.0 / 60.0);

    let shown = ctx.visual_pose(die).expect("visual");
    assert_eq!(shown.position, Vec3::new(1.0, 3.0, -2.0));
    assert_eq!(shown.orientation, orientation);
}

#[test]
fn test_sync_holds_position_above_clamp() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[0];
    let body = body_of(&ctx, die);
    let before = ctx.visual_pose(die).expect("visual").position;

    let orientation = Quat::from_rotation_y(1.2);
    ctx.physics.bodies[body].pose = Some(Pose::new(Vec3::new(0.0, 25.0, 0.0), orientation));
    run(&mut ctx, vec![], 1.0 / 60.0);

    let shown = ctx.visual_pose(die).expect("visual");
    assert_eq!(shown.position, before, "position frozen above clamp height");
    assert_eq!(shown.orientation, orientation, "orientation still follows");

    // Exactly at the clamp height is copied
    ctx.physics.bodies[body].pose = Some(Pose::new(Vec3::new(0.0, 20.0, 0.0), orientation));
    run(&mut ctx, vec![], 1.0 / 60.0);
    assert_eq!(
        ctx.visual_pose(die).expect("visual").position,
        Vec3::new(0.0, 20.0, 0.0)
    );
}

#[test]
fn test_body_without_motion_state_is_skipped() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[1];
    let body = body_of(&ctx, die);
    let before = ctx.visual_pose(die).expect("visual");

    ctx.physics.bodies[body].pose = None;
    run(&mut ctx, vec![], 1.0 / 60.0);

    assert_eq!(ctx.visual_pose(die), Some(before));
}

#[test]
fn test_hover_over_die() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[0];
    let pixel = pixel_for(&ctx, ctx.visual_pose(die).expect("visual").position);

    run(&mut ctx, vec![InputEvent::PointerMoved { position: pixel }], 0.0);

    assert_eq!(ctx.hover.hovered, Some(die));
    assert!(ctx.highlights.hover.enabled);
    assert_eq!(ctx.highlights.hover.visible_objects(), &[die]);
}

#[test]
fn test_hover_over_table_clears() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[0];
    let over_die = pixel_for(&ctx, ctx.visual_pose(die).expect("visual").position);
    let over_table = pixel_for(&ctx, Vec3::new(-10.0, -0.5, -10.0));

    run(&mut ctx, vec![InputEvent::PointerMoved { position: over_die }], 0.0);
    assert!(ctx.hover.is_hovering());

    run(&mut ctx, vec![InputEvent::PointerMoved { position: over_table }], 0.0);
    assert_eq!(ctx.hover.hovered, None);
    assert!(!ctx.highlights.hover.enabled);
    assert!(ctx.highlights.hover.visible_objects().is_empty());
}

#[test]
fn test_hover_over_nothing_clears() {
    let mut ctx = scripted_context(1);
    ctx.camera.target = Vec3::new(0.0, 200.0, 0.0);
    let center = Vec2::new(ctx.viewport.width * 0.5, ctx.viewport.height * 0.5);

    run(&mut ctx, vec![InputEvent::PointerMoved { position: center }], 0.0);

    assert_eq!(ctx.hover.hovered, None);
    assert!(!ctx.highlights.hover.enabled);
}

#[test]
fn test_click_selects_once() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[0];
    let pixel = pixel_for(&ctx, ctx.visual_pose(die).expect("visual").position);

    run(
        &mut ctx,
        vec![
            InputEvent::PointerMoved { position: pixel },
            InputEvent::PrimaryPressed,
            InputEvent::PrimaryPressed,
        ],
        0.0,
    );

    assert_eq!(ctx.selection.as_slice(), &[die]);
    assert!(ctx.highlights.selected.enabled);
    assert_eq!(ctx.highlights.selected.visible_objects(), &[die]);
}

#[test]
fn test_click_on_nothing_clears_selection() {
    let mut ctx = scripted_context(1);
    select_all_dice(&mut ctx);
    assert_eq!(ctx.selection.len(), 2);

    let over_table = pixel_for(&ctx, Vec3::new(-10.0, -0.5, -10.0));
    run(
        &mut ctx,
        vec![
            InputEvent::PointerMoved { position: over_table },
            InputEvent::PrimaryPressed,
        ],
        0.0,
    );

    assert!(ctx.selection.is_empty());
    assert!(!ctx.highlights.selected.enabled);
    assert!(ctx.highlights.selected.visible_objects().is_empty());
}

#[test]
fn test_roll_throws_selected_dice() {
    let mut ctx = scripted_context(7);
    select_all_dice(&mut ctx);
    let dice = ctx.dice();

    let mut queue = InputQueue::default();
    queue.push(InputEvent::KeyPressed(KeyCode::Space));
    let report = FrameDriver::tick(&mut ctx, &mut queue, 1.0 / 60.0);

    assert_eq!(report.rolled, dice);
    assert!(ctx.tracker.is_rolling());

    let first = &ctx.physics.bodies[body_of(&ctx, dice[0])];
    let second = &ctx.physics.bodies[body_of(&ctx, dice[1])];
    assert_eq!(first.linear, Vec3::new(0.0, 10.0, 0.0));
    assert_eq!(second.linear, Vec3::new(0.0, 10.0, 0.0));
    assert_ne!(first.angular, second.angular);
    for spin in [first.angular, second.angular] {
        for component in spin.to_array() {
            assert!((-25.0..=25.0).contains(&component));
        }
    }
}

#[test]
fn test_roll_with_same_seed_repeats() {
    let spins = |seed| {
        let mut ctx = scripted_context(seed);
        select_all_dice(&mut ctx);
        run(&mut ctx, vec![InputEvent::KeyPressed(KeyCode::Space)], 0.0);
        let spins: Vec<Vec3> = ctx
            .dice()
            .into_iter()
            .map(|die| ctx.physics.bodies[body_of(&ctx, die)].angular)
            .collect();
        spins
    };
    assert_eq!(spins(42), spins(42));
}

#[test]
fn test_roll_without_selection_does_nothing() {
    let mut ctx = scripted_context(1);
    let mut queue = InputQueue::default();
    queue.push(InputEvent::KeyPressed(KeyCode::Space));

    let report = FrameDriver::tick(&mut ctx, &mut queue, 1.0 / 60.0);

    assert!(report.rolled.is_empty());
    assert_eq!(ctx.physics.velocity_writes, 0);
    assert!(!ctx.tracker.is_rolling());
}

#[test]
fn test_other_keys_do_not_roll() {
    let mut ctx = scripted_context(1);
    select_all_dice(&mut ctx);
    run(&mut ctx, vec![InputEvent::KeyPressed(KeyCode::KeyR)], 0.0);
    assert_eq!(ctx.physics.velocity_writes, 0);
}

#[test]
fn test_resize_updates_aspect_only() {
    let mut ctx = scripted_context(1);
    let poses: Vec<_> = ctx.dice().into_iter().map(|d| ctx.visual_pose(d)).collect();
    let eye = ctx.camera.position;

    run(
        &mut ctx,
        vec![InputEvent::Resized {
            width: 800.0,
            height: 600.0,
        }],
        0.0,
    );

    assert!((ctx.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    assert_eq!(ctx.viewport.width, 800.0);
    assert!((ctx.camera.position - eye).length() < 1e-3);
    let after: Vec<_> = ctx.dice().into_iter().map(|d| ctx.visual_pose(d)).collect();
    assert_eq!(poses, after);
}

#[test]
fn test_zero_resize_is_ignored() {
    let mut ctx = scripted_context(1);
    let aspect = ctx.camera.aspect;
    run(
        &mut ctx,
        vec![InputEvent::Resized {
            width: 0.0,
            height: 600.0,
        }],
        0.0,
    );
    assert_eq!(ctx.camera.aspect, aspect);
}

#[test]
fn test_zoom_moves_eye_away() {
    let mut ctx = scripted_context(1);
    let before = (ctx.camera.position - ctx.camera.target).length();
    run(&mut ctx, vec![InputEvent::Zoom { lines: 3.0 }], 0.0);
    let after = (ctx.camera.position - ctx.camera.target).length();
    assert!(after > before);
}

#[test]
fn test_settle_reads_top_faces() {
    let mut ctx = scripted_context(3);
    select_all_dice(&mut ctx);
    run(&mut ctx, vec![InputEvent::KeyPressed(KeyCode::Space)], 0.0);
    let dice = ctx.dice();

    // Still spinning: nothing settles
    let mut queue = InputQueue::default();
    let report = FrameDriver::tick(&mut ctx, &mut queue, 0.3);
    assert!(report.settled.is_none());

    let first = body_of(&ctx, dice[0]);
    let second = body_of(&ctx, dice[1]);
    for body in [first, second] {
        ctx.physics.bodies[body].linear = Vec3::ZERO;
        ctx.physics.bodies[body].angular = Vec3::ZERO;
    }
    ctx.physics.bodies[first].pose = Some(Pose::new(Vec3::new(0.0, -0.5, 0.0), Quat::IDENTITY));
    ctx.physics.bodies[second].pose = Some(Pose::new(
        Vec3::new(0.0, -0.5, 5.0),
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
    ));

    let report = FrameDriver::tick(&mut ctx, &mut queue, 0.3);
    assert!(report.settled.is_none());
    let report = FrameDriver::tick(&mut ctx, &mut queue, 0.3);
    let outcome = report.settled.expect("settled after 0.6s still");

    assert_eq!(outcome.faces, vec![(dice[0], 2), (dice[1], 1)]);
    assert_eq!(outcome.describe(), "2 + 1 = 3");
    assert_eq!(ctx.tracker.last_outcome, Some(outcome));
    assert!(!ctx.tracker.is_rolling());
}

#[test]
fn test_selection_survives_hover_changes() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[0];
    let over_die = pixel_for(&ctx, ctx.visual_pose(die).expect("visual").position);
    let over_table = pixel_for(&ctx, Vec3::new(-10.0, -0.5, -10.0));

    run(
        &mut ctx,
        vec![
            InputEvent::PointerMoved { position: over_die },
            InputEvent::PrimaryPressed,
            InputEvent::PointerMoved { position: over_table },
        ],
        0.0,
    );

    assert_eq!(ctx.selection.as_slice(), &[die]);
    assert!(ctx.highlights.selected.enabled);
    assert_eq!(ctx.highlights.selected.visible_objects(), &[die]);
    assert!(!ctx.highlights.hover.enabled);
    assert_eq!(ctx.hover.hovered, None);

    ctx.camera.target = Vec3::new(0.0, 200.0, 0.0);
    let center = Vec2::new(ctx.viewport.width * 0.5, ctx.viewport.height * 0.5);
    run(&mut ctx, vec![InputEvent::PointerMoved { position: center }], 0.0);

    assert_eq!(ctx.selection.as_slice(), &[die]);
    assert!(ctx.highlights.selected.enabled);
    assert!(!ctx.highlights.hover.enabled);
}

#[test]
fn test_click_then_move_off_in_one_frame_selects() {
    let mut ctx = scripted_context(1);
    let die = ctx.dice()[0];
    let over_die = pixel_for(&ctx, ctx.visual_pose(die).expect("visual").position);
    let over_table = pixel_for(&ctx, Vec3::new(-10.0, -0.5, -10.0));
    run(&mut ctx, vec![InputEvent::PointerMoved { position: over_die }], 0.0);

    let cursor = |position| {
        WindowEvent::CursorMoved(CursorMoved {
            window: Entity::PLACEHOLDER,
            position,
            delta: None,
        })
    };
    let press = WindowEvent::MouseButtonInput(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Pressed,
        window: Entity::PLACEHOLDER,
    });

    // Press lands before the move away from the die
    let mut queue = InputQueue::default();
    let mut dragging = false;
    for event in [press, cursor(over_table)] {
        queue_window_event(&mut queue, &event, &mut dragging);
    }
    FrameDriver::tick(&mut ctx, &mut queue, 0.0);

    assert_eq!(ctx.selection.as_slice(), &[die]);
    assert_eq!(ctx.hover.hovered, None);
}

#[test]
fn test_roll_before_clearing_click_uses_old_selection() {
    let mut ctx = scripted_context(5);
    select_all_dice(&mut ctx);
    let dice = ctx.dice();
    let over_table = pixel_for(&ctx, Vec3::new(-10.0, -0.5, -10.0));

    let mut queue = InputQueue::default();
    queue.push(InputEvent::KeyPressed(KeyCode::Space));
    queue.push(InputEvent::PointerMoved { position: over_table });
    queue.push(InputEvent::PrimaryPressed);
    let report = FrameDriver::tick(&mut ctx, &mut queue, 0.0);

    assert_eq!(report.rolled, dice);
    assert!(ctx.selection.is_empty());
}
