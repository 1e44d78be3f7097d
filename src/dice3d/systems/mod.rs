//! Systems module for dice3d
//!
//! Bevy systems around the simulation context, organized by concern:
//!
//! - `setup`: Scene initialization (camera, lights, table, dice, status text)
//! - `input`: Window and device messages into the input queue
//! - `frame`: Frame driver and visual mirroring
//! - `camera`: Orbit rig onto the render camera
//! - `highlight`: Hover and selection outlines
//! - `status`: Status line updates

mod camera;
mod frame;
mod highlight;
mod input;
mod setup;
mod status;

pub use camera::sync_camera;
pub use frame::{drive_frame, mirror_visuals};
pub use highlight::draw_highlights;
pub use input::{collect_input, queue_window_event};
pub use setup::{setup, StatusText, STATUS_HINT};
pub use status::update_status_text;
