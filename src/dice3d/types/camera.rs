//! Camera rig, viewport and orbit controls
//!
//! The rig is the single source of truth for the view: picking rays are built
//! from it and the Bevy camera transform is copied from it every frame.

use bevy::math::{Dir3, Ray3d, Vec2, Vec3};
use bevy::prelude::{Component, Transform};

use super::settings::CameraSettings;

/// Marker for the Bevy camera driven by the [`CameraRig`].
#[derive(Component)]
pub struct MainCamera;

/// Viewport size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pointer pixels to normalized device coordinates, +Y up.
    pub fn to_ndc(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            (position.x / self.width) * 2.0 - 1.0,
            -(position.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// Perspective camera looking at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraRig {
    pub fn from_settings(settings: &CameraSettings, aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(settings.position),
            target: Vec3::from_array(settings.target),
            fov: settings.fov_degrees.to_radians(),
            aspect,
            near: settings.near,
            far: settings.far,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, Vec3::Y)
    }

    /// Ray from the eye through a point given in normalized device
    /// coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray3d {
        let half_height = (self.fov * 0.5).tan();
        let local = Vec3::new(ndc.x * half_height * self.aspect, ndc.y * half_height, -1.0);
        let direction = Dir3::new(self.transform().rotation * local).unwrap_or(Dir3::NEG_Z);
        Ray3d::new(self.position, direction)
    }
}

/// Orbit controls around the rig target: drag rotates, wheel zooms, no pan.
/// Rotation is damped, so input keeps easing out over the following frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,
    pub zoom_speed: f32,
    pub rotate_speed: f32,
    pub damping_factor: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl OrbitControls {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            max_polar_angle: settings.max_polar_angle,
            zoom_speed: settings.zoom_speed,
            rotate_speed: settings.rotate_speed,
            damping_factor: settings.damping_factor,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Queue a rotation for a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2, viewport: &Viewport) {
        if viewport.height <= 0.0 {
            return;
        }
        let per_pixel = std::f32::consts::TAU * self.rotate_speed / viewport.height;
        self.pending_azimuth -= delta.x * per_pixel;
        self.pending_polar -= delta.y * per_pixel;
    }

    /// Queue a zoom of `lines` wheel lines; positive moves the eye away.
    pub fn zoom(&mut self, lines: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        self.pending_scale *= step.powf(-lines);
    }

    /// Apply damped rotation and pending zoom to the rig. Call once per frame.
    pub fn update(&mut self, rig: &mut CameraRig) {
        let offset = rig.position - rig.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        azimuth += self.pending_azimuth * self.damping_factor;
        polar += self.pending_polar * self.damping_factor;
        polar = polar.clamp(1e-6, self.max_polar_angle);

        radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        let sin_polar = polar.sin();
        rig.position = rig.target
            + Vec3::new(
                radius * sin_polar * azimuth.sin(),
                radius * polar.cos(),
                radius * sin_polar * azimuth.cos(),
            );

        self.pending_azimuth *= 1.0 - self.damping_factor;
        self.pending_polar *= 1.0 - self.damping_factor;
        self.pending_scale = 1.0;
    }
}
