//! Dice-related types
//!
//! Face layout of the six-sided die, upward-face readout, and the tracker
//! that notices when a roll has come to rest.

use bevy::math::{Quat, Vec3};

use super::entity::EntityId;

/// Outward face normals and their pip values. Opposite faces sum to seven.
pub const D6_FACES: [(Vec3, u32); 6] = [
    (Vec3::X, 1),
    (Vec3::NEG_X, 6),
    (Vec3::Y, 2),
    (Vec3::NEG_Y, 5),
    (Vec3::Z, 3),
    (Vec3::NEG_Z, 4),
];

/// Linear and angular speed below which a die counts as still.
pub const SETTLE_SPEED: f32 = 0.1;
/// How long every rolled die must stay still before the roll is read.
pub const SETTLE_SECONDS: f32 = 0.5;

/// Value of the face whose normal points most nearly straight up.
pub fn top_face(orientation: Quat) -> u32 {
    let mut best_value = D6_FACES[0].1;
    let mut best_dot = f32::NEG_INFINITY;

    for (normal, value) in D6_FACES {
        let dot = (orientation * normal).dot(Vec3::Y);
        if dot > best_dot {
            best_dot = dot;
            best_value = value;
        }
    }

    best_value
}

/// Face values of a settled roll, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub faces: Vec<(EntityId, u32)>,
}

impl RollOutcome {
    pub fn total(&self) -> u32 {
        self.faces.iter().map(|(_, v)| v).sum()
    }

    pub fn describe(&self) -> String {
        let values: Vec<String> = self.faces.iter().map(|(_, v)| v.to_string()).collect();
        if values.len() == 1 {
            values[0].clone()
        } else {
            format!("{} = {}", values.join(" + "), self.total())
        }
    }
}

/// Tracks the dice of the latest roll until they stop moving.
#[derive(Debug, Default, Clone)]
pub struct RollTracker {
    rolling: Vec<EntityId>,
    settle_timer: f32,
    pub last_outcome: Option<RollOutcome>,
}

impl RollTracker {
    pub fn start(&mut self, dice: Vec<EntityId>) {
        self.rolling = dice;
        self.settle_timer = 0.0;
    }

    pub fn is_rolling(&self) -> bool {
        !self.rolling.is_empty()
    }

    pub fn rolling(&self) -> &[EntityId] {
        &self.rolling
    }

    /// Feed one frame. `all_still` says whether every tracked die is below
    /// [`SETTLE_SPEED`]; returns the tracked dice once they have been still
    /// for [`SETTLE_SECONDS`], ending the roll.
    pub fn advance(&mut self, all_still: bool, delta: f32) -> Option<Vec<EntityId>> {
        if self.rolling.is_empty() {
            return None;
        }

        if !all_still {
            self.settle_timer = 0.0;
            return None;
        }

        self.settle_timer += delta;
        if self.settle_timer > SETTLE_SECONDS {
            self.settle_timer = 0.0;
            return Some(std::mem::take(&mut self.rolling));
        }
        None
    }
}
