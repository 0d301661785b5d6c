//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Eye position tracking (mirrored from the player controller)
//! - Mouse look with configurable sensitivity
//! - First/third person toggling
//!
//! ## Core Components
//! - `Camera`: Represents the eye's position and orientation in 3D space
//! - `CameraState`: Applies look input to the camera

use cgmath::{Deg, Point3};

use crate::engine_state::config::ControlsConfig;

pub mod camera;

use camera::Camera;

/// Manages the camera and the settings that drive it from input.
#[derive(Debug, Clone)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// User adjustable multiplier on mouse look
    sensitivity: f32,
    /// Radians per unit of mouse motion at sensitivity 1
    look_scale: f32,
}

impl CameraState {
    /// Creates a camera at `eye` looking along +X with a level horizon.
    pub fn new(eye: Point3<f32>, controls: &ControlsConfig) -> Self {
        CameraState {
            camera: Camera::new(eye, Deg(0.0), Deg(0.0)),
            sensitivity: controls.sensitivity,
            look_scale: controls.look_scale,
        }
    }

    /// Rotates the camera by a raw mouse delta.
    pub fn apply_look(&mut self, delta_x: f64, delta_y: f64) {
        let scale = self.sensitivity * self.look_scale;
        self.camera
            .rotate(delta_x as f32 * scale, delta_y as f32 * scale);
    }

    pub fn toggle_mode(&mut self) {
        self.camera.mode = self.camera.mode.toggled();
        log::debug!("Camera mode is now {:?}", self.camera.mode);
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Moves the eye to the player's current position.
    pub fn sync(&mut self, eye: Point3<f32>) {
        self.camera.position = eye;
    }
}
