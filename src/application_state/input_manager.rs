//! # Input Manager
//!
//! This module translates window system events into engine [`InputEvent`]s:
//! - Keyboard presses and releases, with auto-repeat removed
//! - Mouse button presses
//! - Raw mouse motion
//!
//! It also remembers which keys are held so they can all be released when
//! the window loses focus.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::InputEvent;

/// Manages the state of the keyboard and turns window events into input events.
#[derive(Debug, Default)]
pub struct InputManager {
    /// Whether each key seen so far is currently down
    keyboard_inputs: HashMap<KeyCode, bool>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a window event.
    ///
    /// # Returns
    /// The input event it produced, if any
    pub fn intake_input(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        repeat,
                        ..
                    },
                ..
            } => self.intake_key(*key, *state == ElementState::Pressed, *repeat),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => Some(InputEvent::MouseDown(*button)),
            _ => None,
        }
    }

    /// Records a key transition.
    ///
    /// Repeats and presses of keys that are already down produce nothing.
    pub fn intake_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) -> Option<InputEvent> {
        if repeat {
            return None;
        }
        let was_pressed = self.keyboard_inputs.insert(key, pressed).unwrap_or(false);
        match (was_pressed, pressed) {
            (false, true) => Some(InputEvent::KeyDown(key)),
            (true, false) => Some(InputEvent::KeyUp(key)),
            _ => None,
        }
    }

    pub fn intake_mouse_motion(&self, delta: (f64, f64)) -> InputEvent {
        InputEvent::MouseMotion {
            delta_x: delta.0,
            delta_y: delta.1,
        }
    }

    /// Releases every held key.
    ///
    /// This is called when the window loses focus to prevent stuck keys.
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        let released: Vec<InputEvent> = self
            .keyboard_inputs
            .iter()
            .filter(|(_, pressed)| **pressed)
            .map(|(key, _)| InputEvent::KeyUp(*key))
            .collect();
        self.keyboard_inputs.clear();
        released
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.keyboard_inputs.get(&key).copied().unwrap_or(false)
    }
}
