//! Scene setup system
//!
//! Spawns the camera, lights, table, dice and status text. Every mesh entity
//! carries a [`VisualLink`] back to its node in the simulation scene graph.

use bevy::prelude::*;

use crate::dice3d::context::SimulationContext;
use crate::dice3d::meshes::{create_d6, d6_face_quads, d6_face_texture_path};
use crate::dice3d::scene::VisualLink;
use crate::dice3d::types::*;

/// Marker for the status line at the top of the window.
#[derive(Component)]
pub struct StatusText;

pub const STATUS_HINT: &str = "Click dice to select them, press SPACE to roll";

/// Main setup system - builds the render side of the simulation
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    settings: Res<DiceRollerSettings>,
    ctx: Res<SimulationContext>,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: ctx.camera.fov,
            aspect_ratio: ctx.camera.aspect,
            near: ctx.camera.near,
            far: ctx.camera.far,
            ..default()
        }),
        ctx.camera.transform(),
        AmbientLight {
            color: settings.ambient_color.to_color().unwrap_or(Color::BLACK),
            brightness: 400.0,
            ..default()
        },
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 3000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 50.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    // Table
    if let Some(table) = ctx.table() {
        if let Some(entity) = ctx.registry.get(table) {
            let size = Vec3::from_array(settings.table.size);
            let color = settings.table.color.to_color().unwrap_or(Color::WHITE);
            commands.spawn((
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color,
                    perceptual_roughness: 0.9,
                    ..default()
                })),
                pose_transform(ctx.scene.pose(entity.visual).unwrap_or_default()),
                VisualLink(entity.visual),
            ));
        }
    }

    // Dice are registered in settings order
    for (id, die) in ctx.dice().into_iter().zip(settings.dice.iter()) {
        let Some(entity) = ctx.registry.get(id) else {
            continue;
        };
        let color = die.color.to_color().unwrap_or(Color::WHITE);
        let body = commands
            .spawn((
                Mesh3d(meshes.add(create_d6(die.size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color,
                    perceptual_roughness: 0.5,
                    ..default()
                })),
                pose_transform(ctx.scene.pose(entity.visual).unwrap_or_default()),
                VisualLink(entity.visual),
            ))
            .id();

        if let Some(dir) = &settings.textures_dir {
            let quad = meshes.add(Rectangle::new(1.0, 1.0));
            commands.entity(body).with_children(|parent| {
                for (transform, value) in d6_face_quads(die.size) {
                    let texture: Handle<Image> =
                        asset_server.load(d6_face_texture_path(dir, value));
                    parent.spawn((
                        Mesh3d(quad.clone()),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: color,
                            base_color_texture: Some(texture),
                            ..default()
                        })),
                        transform,
                    ));
                }
            });
        }
    }

    commands.spawn((
        Text::new(STATUS_HINT),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.1, 0.1, 0.1)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        StatusText,
    ));

    info!("Scene ready: {} dice on the table", ctx.dice().len());
}

pub(crate) fn pose_transform(pose: Pose) -> Transform {
    Transform::from_translation(pose.position).with_rotation(pose.orientation)
}
