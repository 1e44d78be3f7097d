//! The simulation context: every piece of mutable state the frame loop
//! touches, owned in one place.

use bevy::log::debug;
use bevy::math::Vec3;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dice3d::physics::{BodyDesc, PhysicsStepper, PhysicsWorld, RapierWorld};
use crate::dice3d::scene::SceneGraph;
use crate::dice3d::types::{
    CameraRig, DiceRollerSettings, EntityId, EntityKind, Highlights, HoverState, OrbitControls,
    Pose, Registry, RollTracker, SelectionSet, SettingsError, SimEntity, Viewport,
};

/// Roll parameters resolved from settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollCommand {
    pub linear_velocity: Vec3,
    pub spin: f32,
}

#[derive(Resource)]
pub struct SimulationContext<P: PhysicsWorld = RapierWorld> {
    pub physics: P,
    pub stepper: PhysicsStepper,
    pub registry: Registry,
    pub scene: SceneGraph,
    pub hover: HoverState,
    pub selection: SelectionSet,
    pub highlights: Highlights,
    pub camera: CameraRig,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub clamp_height: f32,
    pub roll: RollCommand,
    pub tracker: RollTracker,
    pub rng: StdRng,
}

impl SimulationContext<RapierWorld> {
    /// Build the Rapier-backed context and spawn the table and dice.
    pub fn from_settings(
        settings: &DiceRollerSettings,
        seed: Option<u64>,
    ) -> Result<Self, SettingsError> {
        let physics = RapierWorld::new(Vec3::new(0.0, settings.physics.gravity, 0.0));
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut ctx = Self::with_physics(physics, settings, rng)?;
        ctx.populate(settings);
        Ok(ctx)
    }
}

impl<P: PhysicsWorld> SimulationContext<P> {
    /// An empty context around `physics`; call [`Self::populate`] or
    /// [`Self::spawn`] to add entities.
    pub fn with_physics(
        physics: P,
        settings: &DiceRollerSettings,
        rng: StdRng,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        let viewport = Viewport::new(settings.window.width as f32, settings.window.height as f32);
        let highlights = Highlights::new(
            settings.highlight.hover_color.to_color()?,
            settings.highlight.selected_color.to_color()?,
        );

        Ok(Self {
            physics,
            stepper: PhysicsStepper::new(
                settings.physics.fixed_timestep,
                settings.physics.max_substeps,
            ),
            registry: Registry::new(),
            scene: SceneGraph::new(),
            hover: HoverState::default(),
            selection: SelectionSet::default(),
            highlights,
            camera: CameraRig::from_settings(&settings.camera, viewport.aspect()),
            controls: OrbitControls::from_settings(&settings.camera),
            viewport,
            clamp_height: settings.physics.clamp_height,
            roll: RollCommand {
                linear_velocity: Vec3::from_array(settings.roll.linear_velocity),
                spin: settings.roll.spin,
            },
            tracker: RollTracker::default(),
            rng,
        })
    }

    /// Spawn the table first, then every configured die.
    pub fn populate(&mut self, settings: &DiceRollerSettings) {
        let physics = &settings.physics;
        let table = &settings.table;
        self.spawn(
            EntityKind::Table,
            BodyDesc {
                position: Vec3::from_array(table.position),
                half_extents: Vec3::from_array(table.size) * 0.5,
                mass: 0.0,
                friction: physics.friction,
                restitution: physics.restitution,
            },
        );

        for die in &settings.dice {
            self.spawn(
                EntityKind::Die,
                BodyDesc {
                    position: Vec3::from_array(die.position),
                    half_extents: Vec3::splat(die.size * 0.5),
                    mass: die.mass,
                    friction: physics.friction,
                    restitution: physics.restitution,
                },
            );
        }
    }

    /// Create the body and its visual node together and register the pair.
    pub fn spawn(&mut self, kind: EntityKind, desc: BodyDesc) -> EntityId {
        let body = self.physics.add_body(&desc);
        if kind == EntityKind::Die {
            self.physics.disable_deactivation(body);
        }
        let visual = self
            .scene
            .add(Pose::from_position(desc.position), desc.half_extents);
        let id = self.registry.insert(SimEntity { visual, body, kind });
        debug!("spawned {} {} at {:?}", kind.name(), id, desc.position);
        id
    }

    /// Pose currently shown for `id`.
    pub fn visual_pose(&self, id: EntityId) -> Option<Pose> {
        let entity = self.registry.get(id)?;
        self.scene.pose(entity.visual)
    }

    /// Pose currently simulated for `id`.
    pub fn body_pose(&self, id: EntityId) -> Option<Pose> {
        let entity = self.registry.get(id)?;
        self.physics.motion_state(entity.body)
    }

    pub fn table(&self) -> Option<EntityId> {
        self.registry
            .iter()
            .find(|(_, e)| e.kind == EntityKind::Table)
            .map(|(id, _)| id)
    }

    pub fn dice(&self) -> Vec<EntityId> {
        self.registry.dice().map(|(id, _)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_has_table_then_two_dice() {
        let ctx = SimulationContext::from_settings(&DiceRollerSettings::default(), Some(1)).unwrap();
        let kinds: Vec<EntityKind> = ctx.registry.iter().map(|(_, e)| e.kind).collect();
        assert_eq!(kinds, vec![EntityKind::Table, EntityKind::Die, EntityKind::Die]);
        assert_eq!(ctx.scene.len(), 3);
        assert_eq!(ctx.physics.body_count(), 3);
    }

    #[test]
    fn test_visual_starts_at_body_pose() {
        let ctx = SimulationContext::from_settings(&DiceRollerSettings::default(), Some(1)).unwrap();
        for id in ctx.dice() {
            assert_eq!(ctx.visual_pose(id), ctx.body_pose(id));
        }
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let mut settings = DiceRollerSettings::default();
        settings.highlight.hover_color.0 = "yellow".to_string();
        assert!(matches!(
            SimulationContext::from_settings(&settings, None),
            Err(SettingsError::InvalidColor(_))
        ));
    }
}
