//! Input handling for the diorama controls.
//!
//! Raw winit events are folded into per-frame state: drag deltas while the
//! left mouse button is held (camera yaw/pitch), accumulated scroll (camera
//! distance), and the two held arrow keys that steer the orbit direction.

use glam::Vec2;
use std::collections::HashSet;

/// Pixels of drag equivalent to one line of wheel scroll.
const LINE_SCROLL_PIXELS: f32 = 40.0;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (events arrive more often than frames).
    accumulated_delta: Vec2,

    /// Scroll delta this frame, in pixel-equivalent units (positive = away).
    scroll_delta: f32,
    /// Accumulated scroll between frames.
    accumulated_scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
        self.scroll_delta = self.accumulated_scroll;
        self.accumulated_scroll = 0.0;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process raw mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    /// Process a scroll event. Line scrolls are converted to pixel units.
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => {
                self.accumulated_scroll += y * LINE_SCROLL_PIXELS;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                self.accumulated_scroll += pos.y as f32;
            }
        }
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Get the mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse delta while the drag button is held, otherwise zero.
    pub fn drag_delta(&self) -> Vec2 {
        if self.mouse_held.contains(&MouseButton::Left) {
            self.mouse_delta
        } else {
            Vec2::ZERO
        }
    }

    /// Scroll delta this frame in pixel-equivalent units.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Orbit forward key held (ArrowRight).
    pub fn is_forward_held(&self) -> bool {
        self.is_key_held(KeyCode::ArrowRight)
    }

    /// Orbit reverse key held (ArrowLeft).
    pub fn is_reverse_held(&self) -> bool {
        self.is_key_held(KeyCode::ArrowLeft)
    }

    /// Check if quit was pressed (Escape).
    pub fn is_quit_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton, MouseScrollDelta};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_delta_requires_held_button() {
        let mut input = InputState::new();
        input.process_mouse_motion((4.0, -2.0));
        input.begin_frame();
        assert_eq!(input.drag_delta(), Vec2::ZERO);

        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.process_mouse_motion((4.0, -2.0));
        input.begin_frame();
        assert_eq!(input.drag_delta(), Vec2::new(4.0, -2.0));
    }

    #[test]
    fn scroll_accumulates_until_frame_start() {
        let mut input = InputState::new();
        input.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.process_scroll(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 10.0),
        ));
        input.begin_frame();
        assert_eq!(input.scroll_delta(), LINE_SCROLL_PIXELS + 10.0);
        input.begin_frame();
        assert_eq!(input.scroll_delta(), 0.0);
    }

    #[test]
    fn directional_keys_are_independent_holds() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        input.process_keyboard(KeyCode::ArrowRight, ElementState::Pressed);
        input.begin_frame();
        assert!(input.is_forward_held() && input.is_reverse_held());
        input.process_keyboard(KeyCode::ArrowRight, ElementState::Released);
        assert!(!input.is_forward_held() && input.is_reverse_held());
    }
}
