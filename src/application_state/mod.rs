//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Window and GPU creation
//! - Input handling and pointer lock
//! - Application lifecycle events
//! - Frame timing

pub mod graphics_resources_builder;
pub mod input_manager;
pub mod input_state;

use std::sync::Arc;

use graphics_resources_builder::{create_graphics, Graphics};
use input_manager::InputManager;
use input_state::InputEvent;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::engine_state::{config::EngineConfig, rendering::PipelineManager, EngineState};

const WINDOW_TITLE: &str = "Voxel Sandbox";

/// The main application state container that manages the application's lifecycle.
///
/// The window and engine are created on the first `resumed` call. It
/// implements `ApplicationHandler` to handle window and device events.
pub struct ApplicationState {
    /// Configuration used when the engine is created
    config: EngineConfig,

    /// The initialized application state, if the application has started
    pub state: Option<InitializedApplicationState>,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The core game engine state and logic
    pub engine_state: EngineState,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Whether the cursor is currently captured
    pub pointer_locked: bool,

    /// Timestamp of the last frame for delta time calculations
    pub last_frame_time: web_time::Instant,
}

impl ApplicationState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }
}

impl InitializedApplicationState {
    /// Captures the cursor so mouse motion drives the camera.
    fn lock_pointer(&mut self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.pointer_locked = true;
                self.engine_state
                    .push_input(InputEvent::PointerLockChanged(true));
            }
            Err(err) => warn!("Could not capture the cursor: {err}"),
        }
    }

    fn unlock_pointer(&mut self) {
        if let Err(err) = self.window.set_cursor_grab(CursorGrabMode::None) {
            warn!("Could not release the cursor: {err}");
        }
        self.window.set_cursor_visible(true);
        self.pointer_locked = false;
        self.engine_state
            .push_input(InputEvent::PointerLockChanged(false));
    }
}

impl ApplicationHandler for ApplicationState {
    /// Handles window-related events such as focus changes and input events.
    ///
    /// Escape releases the pointer lock, or closes the window when the
    /// pointer is already free.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            if let WindowEvent::CloseRequested = event {
                event_loop.exit();
            }
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                state.engine_state.resize_surface(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = web_time::Instant::now();
                let frame_dt = now - state.last_frame_time;
                state.last_frame_time = now;

                state.engine_state.tick(frame_dt);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if state.pointer_locked {
                    state.unlock_pointer();
                } else {
                    event_loop.exit();
                }
            }
            WindowEvent::Focused(false) => {
                for released in state.input_manager.release_all() {
                    state.engine_state.push_input(released);
                }
                if state.pointer_locked {
                    state.unlock_pointer();
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                // The click that captures the cursor must not edit the world,
                // so it is queued before the lock change.
                if let Some(input) = state.input_manager.intake_input(&event) {
                    state.engine_state.push_input(input);
                }
                if !state.pointer_locked {
                    state.lock_pointer();
                }
            }
            _ => {
                if let Some(input) = state.input_manager.intake_input(&event) {
                    state.engine_state.push_input(input);
                }
            }
        }
    }

    /// Handles device-level input events such as mouse motion.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                if state.pointer_locked {
                    let input = state.input_manager.intake_mouse_motion(delta);
                    state.engine_state.push_input(input);
                }
            }
        }
    }

    /// Creates the window, the GPU resources and the engine the first time
    /// the application resumes.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title(WINDOW_TITLE);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Could not create a window: {err}");
                event_loop.exit();
                return;
            }
        };

        let graphics = match pollster::block_on(create_graphics(window.clone())) {
            Ok(graphics) => graphics,
            Err(err) => {
                error!("Could not initialize graphics: {err}");
                event_loop.exit();
                return;
            }
        };
        let Graphics {
            surface,
            surface_config,
            device,
            queue,
            ..
        } = graphics;
        let renderer = PipelineManager::new(surface, device, queue, surface_config);

        let engine_state = EngineState::new(self.config.clone(), Box::new(renderer));
        info!("Engine ready, click the window to capture the cursor");

        self.state = Some(InitializedApplicationState {
            engine_state,
            window,
            input_manager: InputManager::new(),
            pointer_locked: false,
            last_frame_time: web_time::Instant::now(),
        });
    }

    /// Called before the event loop goes to sleep.
    ///
    /// Requests the next frame; the engine ticks when it is drawn.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}
