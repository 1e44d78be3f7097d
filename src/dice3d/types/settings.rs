//! Application settings types and persistence
//!
//! Settings are stored as JSON. Every field has a default, so a partial file
//! only overrides what it names.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid color {0:?}, expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Hex color string, `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorSetting(pub String);

impl ColorSetting {
    pub fn hex(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn to_color(&self) -> Result<Color, SettingsError> {
        let hex = self.0.trim().trim_start_matches('#');
        let byte = |i: usize| -> Result<f32, SettingsError> {
            hex.get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .map(|v| v as f32 / 255.0)
                .ok_or_else(|| SettingsError::InvalidColor(self.0.clone()))
        };

        match hex.len() {
            6 => Ok(Color::srgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::srgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => Err(SettingsError::InvalidColor(self.0.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Tabletop Dice".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: f32,
    pub fixed_timestep: f32,
    pub max_substeps: u32,
    /// Dice simulated above this height stop moving on screen.
    pub clamp_height: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 10,
            clamp_height: 20.0,
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollSettings {
    pub linear_velocity: [f32; 3],
    /// Each spin component is drawn from `[-spin, spin]`.
    pub spin: f32,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            linear_velocity: [0.0, 10.0, 0.0],
            spin: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub position: [f32; 3],
    pub size: [f32; 3],
    pub color: ColorSetting,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            position: [0.0, -2.5, 0.0],
            size: [100.0, 4.0, 100.0],
            color: ColorSetting::hex("#523A28"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieSettings {
    pub position: [f32; 3],
    pub color: ColorSetting,
    #[serde(default = "default_die_size")]
    pub size: f32,
    #[serde(default = "default_die_mass")]
    pub mass: f32,
}

fn default_die_size() -> f32 {
    2.0
}

fn default_die_mass() -> f32 {
    1.0
}

impl DieSettings {
    pub fn new(position: [f32; 3], color: &str) -> Self {
        Self {
            position,
            color: ColorSetting::hex(color),
            size: default_die_size(),
            mass: default_die_mass(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians from straight above.
    pub max_polar_angle: f32,
    pub zoom_speed: f32,
    pub rotate_speed: f32,
    pub damping_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            position: [20.0, 40.0, 20.0],
            target: [0.0, 0.0, 0.0],
            near: 0.1,
            far: 500.0,
            min_distance: 10.0,
            max_distance: 100.0,
            max_polar_angle: std::f32::consts::PI / 2.2,
            zoom_speed: 2.0,
            rotate_speed: 1.0,
            damping_factor: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    pub hover_color: ColorSetting,
    pub selected_color: ColorSetting,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            hover_color: ColorSetting::hex("#F0FF00"),
            selected_color: ColorSetting::hex("#FFFFFF"),
        }
    }
}

/// Everything the app reads at startup.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceRollerSettings {
    pub window: WindowSettings,
    pub background_color: ColorSetting,
    pub ambient_color: ColorSetting,
    pub physics: PhysicsSettings,
    pub roll: RollSettings,
    pub table: TableSettings,
    pub dice: Vec<DieSettings>,
    pub camera: CameraSettings,
    pub highlight: HighlightSettings,
    /// Directory holding `d6_side_1.jpg` .. `d6_side_6.jpg`, relative to the
    /// asset folder.
    pub textures_dir: Option<String>,
    pub show_stats: bool,
}

impl Default for DiceRollerSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            background_color: ColorSetting::hex("#CFE2F3"),
            ambient_color: ColorSetting::hex("#222222"),
            physics: PhysicsSettings::default(),
            roll: RollSettings::default(),
            table: TableSettings::default(),
            dice: vec![
                DieSettings::new([0.0, 5.0, 0.0], "#00FF00"),
                DieSettings::new([0.0, 1.0, 5.0], "#00F0F0"),
            ],
            camera: CameraSettings::default(),
            highlight: HighlightSettings::default(),
            textures_dir: None,
            show_stats: true,
        }
    }
}

impl DiceRollerSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check colors and numeric ranges up front so later lookups cannot fail.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.roll.spin.is_finite() && self.roll.spin >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "roll.spin",
                reason: "must be a non-negative number",
            });
        }
        if !(self.physics.fixed_timestep.is_finite() && self.physics.fixed_timestep > 0.0) {
            return Err(SettingsError::Invalid {
                field: "physics.fixed_timestep",
                reason: "must be positive",
            });
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(SettingsError::Invalid {
                field: "window",
                reason: "width and height must be non-zero",
            });
        }
        self.background_color.to_color()?;
        self.ambient_color.to_color()?;
        self.table.color.to_color()?;
        self.highlight.hover_color.to_color()?;
        self.highlight.selected_color.to_color()?;
        for die in &self.dice {
            die.color.to_color()?;
        }
        Ok(())
    }
}
