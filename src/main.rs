// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use clap::Parser;
use std::path::{Path, PathBuf};

use tabletop_dice::dice3d::{
    collect_input, draw_highlights, drive_frame, mirror_visuals, setup, sync_camera,
    update_status_text, DiceRollerSettings, InputQueue, SimulationContext,
};

/// Tabletop Dice - select dice with the pointer and roll them
#[derive(Parser)]
#[command(name = "tabletop-dice")]
#[command(
    author,
    version,
    about = "Tabletop Dice - click dice to select them, press SPACE to roll"
)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Seed for the roll spin generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default settings as JSON and exit
    #[arg(long)]
    print_default_settings: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.print_default_settings {
        match DiceRollerSettings::default().to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    let settings = load_settings(cli.settings.as_deref());
    let context: SimulationContext = match SimulationContext::from_settings(&settings, cli.seed) {
        Ok(context) => context,
        Err(err) => {
            eprintln!("Error: could not build the scene: {}", err);
            std::process::exit(1);
        }
    };

    let background = settings
        .background_color
        .to_color()
        .unwrap_or(Color::WHITE);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: settings.window.title.clone(),
                    resolution: (settings.window.width, settings.window.height).into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: "info,wgpu=error,naga=warn".to_string(),
                ..default()
            }),
    );

    if settings.show_stats {
        app.add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ));
    }

    app.insert_resource(ClearColor(background))
        .insert_resource(settings)
        .insert_resource(context)
        .init_resource::<InputQueue>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                collect_input,
                drive_frame,
                mirror_visuals,
                sync_camera,
                draw_highlights,
                update_status_text,
            )
                .chain(),
        )
        .run();
}

/// Settings from `path`, or the defaults when there is no path or the file
/// cannot be used.
fn load_settings(path: Option<&Path>) -> DiceRollerSettings {
    let Some(path) = path else {
        return DiceRollerSettings::default();
    };

    match DiceRollerSettings::load_from_file(path).and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!(
                "Warning: ignoring settings from {}: {}; using defaults",
                path.display(),
                err
            );
            DiceRollerSettings::default()
        }
    }
}
