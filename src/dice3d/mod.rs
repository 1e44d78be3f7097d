//! Dice roller: simulation core plus the Bevy systems that present it.
//!
//! Everything under [`context`], [`physics`], [`scene`], [`interaction`] and
//! [`frame`] runs without an `App`; [`systems`] wires it into Bevy.

pub mod context;
pub mod frame;
pub mod interaction;
pub mod meshes;
pub mod physics;
pub mod scene;
pub mod sync;
pub mod systems;
pub mod types;

pub use context::{RollCommand, SimulationContext};
pub use frame::{FrameDriver, FrameReport};
pub use physics::{BodyDesc, PhysicsStepper, PhysicsWorld, RapierWorld};
pub use scene::{SceneGraph, VisualLink};
pub use systems::*;
pub use types::*;
