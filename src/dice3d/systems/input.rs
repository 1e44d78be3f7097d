//! Input collection
//!
//! Translates Bevy window events into [`InputEvent`]s on the [`InputQueue`].
//! The simulation only ever sees the queue.

use bevy::input::mouse::MouseScrollUnit;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::WindowEvent;

use crate::dice3d::types::*;

/// Pixels per wheel line for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f32 = 100.0;

/// Queue this frame's input in the order it was delivered.
pub fn collect_input(
    mut queue: ResMut<InputQueue>,
    mut window_events: MessageReader<WindowEvent>,
    mut dragging: Local<bool>,
) {
    for event in window_events.read() {
        queue_window_event(&mut queue, event, &mut dragging);
    }
}

/// Push the [`InputEvent`] for one window event, if it maps to one.
/// `dragging` follows the primary button so motion only orbits while it is
/// held.
pub fn queue_window_event(queue: &mut InputQueue, event: &WindowEvent, dragging: &mut bool) {
    match event {
        WindowEvent::WindowResized(resized) => queue.push(InputEvent::Resized {
            width: resized.width,
            height: resized.height,
        }),
        WindowEvent::CursorMoved(moved) => queue.push(InputEvent::PointerMoved {
            position: moved.position,
        }),
        WindowEvent::MouseMotion(motion) => {
            if *dragging && motion.delta != Vec2::ZERO {
                queue.push(InputEvent::Orbit {
                    delta: motion.delta,
                });
            }
        }
        WindowEvent::MouseWheel(wheel) => {
            let lines = match wheel.unit {
                MouseScrollUnit::Line => wheel.y,
                MouseScrollUnit::Pixel => wheel.y / PIXELS_PER_LINE,
            };
            if lines != 0.0 {
                // Scrolling up moves the eye closer
                queue.push(InputEvent::Zoom { lines: -lines });
            }
        }
        WindowEvent::MouseButtonInput(input) if input.button == MouseButton::Left => {
            match input.state {
                ButtonState::Pressed => {
                    *dragging = true;
                    queue.push(InputEvent::PrimaryPressed);
                }
                ButtonState::Released => *dragging = false,
            }
        }
        WindowEvent::KeyboardInput(input) if input.state == ButtonState::Pressed => {
            queue.push(InputEvent::KeyPressed(input.key_code));
        }
        _ => {}
    }
}
