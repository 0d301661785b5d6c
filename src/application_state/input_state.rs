//! # Input State
//!
//! This module defines the input events the window layer hands to the engine
//! and the queue they wait in until the next tick.

use std::collections::VecDeque;

use winit::{event::MouseButton, keyboard::KeyCode};

/// A single input occurrence, already stripped of platform details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key went down. Auto-repeat is filtered out before this point.
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseDown(MouseButton),
    /// Raw mouse motion, in device units
    MouseMotion { delta_x: f64, delta_y: f64 },
    /// The cursor was captured (`true`) or released (`false`)
    PointerLockChanged(bool),
}

/// FIFO of events waiting for the next tick.
#[derive(Debug, Default, Clone)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Takes every queued event, leaving the queue empty.
    pub fn drain(&mut self) -> VecDeque<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
