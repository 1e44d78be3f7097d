//! Input events queued by the Bevy collector and drained by the frame driver.

use std::collections::VecDeque;

use bevy::input::keyboard::KeyCode;
use bevy::math::Vec2;
use bevy::prelude::Resource;

/// A user input, already stripped of window and device details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in logical pixels, origin at the top-left corner.
    PointerMoved { position: Vec2 },
    /// Primary (left) mouse button went down.
    PrimaryPressed,
    KeyPressed(KeyCode),
    /// Viewport size in logical pixels.
    Resized { width: f32, height: f32 },
    /// Pointer travel in pixels while the primary button is held.
    Orbit { delta: Vec2 },
    /// Wheel travel in lines; positive scrolls away from the user.
    Zoom { lines: f32 },
}

/// FIFO of input events for the next frame.
#[derive(Resource, Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
