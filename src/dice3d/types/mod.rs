//! Types module for dice3d
//!
//! Plain data shared by the simulation core and the Bevy systems:
//!
//! - `entity`: entity ids, backend handles and the registry
//! - `pose`: world-space position and orientation
//! - `interaction`: hover, selection and highlight passes
//! - `input`: queued input events
//! - `camera`: camera rig, viewport and orbit controls
//! - `dice`: d6 faces and roll settle tracking
//! - `settings`: JSON settings

pub mod camera;
pub mod dice;
pub mod entity;
pub mod input;
pub mod interaction;
pub mod pose;
pub mod settings;

pub use camera::*;
pub use dice::*;
pub use entity::*;
pub use input::*;
pub use interaction::*;
pub use pose::*;
pub use settings::*;
