//! Fixed-timestep stepping with a per-frame substep cap.

use bevy::log::debug;

use super::PhysicsWorld;

/// Accumulates frame time and spends it in fixed steps. At most
/// `max_substeps` steps run per call and time past the cap is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsStepper {
    fixed_timestep: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl PhysicsStepper {
    pub const DEFAULT_MAX_SUBSTEPS: u32 = 10;

    pub fn new(fixed_timestep: f32, max_substeps: u32) -> Self {
        Self {
            fixed_timestep,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    pub fn max_substeps(&self) -> u32 {
        self.max_substeps
    }

    /// Advance `world` by `delta` seconds. Returns the number of fixed steps
    /// taken.
    pub fn step<P: PhysicsWorld + ?Sized>(&mut self, world: &mut P, delta: f32) -> u32 {
        if !delta.is_finite() || delta <= 0.0 || self.fixed_timestep <= 0.0 {
            return 0;
        }

        self.accumulator += delta;
        if self.accumulator < self.fixed_timestep {
            return 0;
        }

        let due = (self.accumulator / self.fixed_timestep).floor();
        self.accumulator -= due * self.fixed_timestep;
        // Guard against rounding leaving a hair below zero.
        self.accumulator = self.accumulator.max(0.0);

        let substeps = if due >= self.max_substeps as f32 {
            self.max_substeps
        } else {
            due as u32
        };
        if (substeps as f32) < due {
            self.accumulator = 0.0;
            debug!(
                "physics fell behind: {} steps due, running {}",
                due, substeps
            );
        }

        for _ in 0..substeps {
            world.step_fixed(self.fixed_timestep);
        }
        substeps
    }
}

impl Default for PhysicsStepper {
    fn default() -> Self {
        Self::new(1.0 / 60.0, Self::DEFAULT_MAX_SUBSTEPS)
    }
}
