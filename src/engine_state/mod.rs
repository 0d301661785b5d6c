//! # Engine State Module
//!
//! The core engine module that owns the simulation and drives it one tick at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Eye orientation, mouse look and camera mode
//! * `config` - Tunable engine settings loaded from JSON
//! * `items` - Item catalog and inventory
//! * `npc` - Hook for non-player characters
//! * `player` - Gravity and collision for the player's eye
//! * `rendering` - Chunk meshing, the renderer seam and the wgpu renderer
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Architecture
//!
//! Input handlers never touch the simulation directly. They push
//! [`InputEvent`]s into a queue that [`EngineState::tick`] drains exactly once
//! at the start of each tick, so all state is written from one place.
//!
//! A tick then advances, in order: the player, the camera, the NPCs, the
//! targeted block, and finally hands a [`Frame`] to the renderer.
//!
//! Block edits are applied while draining input. They re-run the targeting
//! ray at that moment rather than trusting the previous tick's target.

use std::rc::Rc;

use camera_state::{camera::Camera, CameraState};
use cgmath::Point3;
use config::EngineConfig;
use items::{Inventory, InventoryStore, ItemCatalog, ItemStack, HOTBAR_SIZE};
use log::{debug, info};
use npc::{IdleNpcs, NpcController};
use player::{MovementInput, PlayerController};
use rendering::{Frame, Renderer};
use voxels::{
    block::block_type::BlockType,
    raycast::{Ray, RaycastHit},
    snapshot::{SnapshotError, WorldSnapshot},
    world::World,
};
use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::application_state::input_state::{InputEvent, InputQueue};

pub mod camera_state;
pub mod config;
pub mod items;
pub mod npc;
pub mod player;
pub mod rendering;
pub mod voxels;

/// Health and hunger both start full at this value.
pub const MAX_VITAL: u32 = 20;

type InventoryCallback = Box<dyn FnMut(&[Option<ItemStack>])>;
type VitalCallback = Box<dyn FnMut(u32, u32)>;

/// Callbacks registered by the UI.
#[derive(Default)]
struct Callbacks {
    inventory: Option<InventoryCallback>,
    health: Option<VitalCallback>,
    hunger: Option<VitalCallback>,
}

/// The main state container for the voxel engine
///
/// This struct owns the world and every subsystem acting on it. It handles
/// input processing, player movement, block editing and frame submission.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{EngineConfig, EngineState, LogRenderer};
/// use web_time::Duration;
///
/// let mut config = EngineConfig::default();
/// config.world.chunk_radius = 0;
/// let mut engine_state = EngineState::new(config, Box::new(LogRenderer::new()));
///
/// // Main game loop
/// for _ in 0..3 {
///     engine_state.tick(Duration::from_millis(16));
/// }
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    world: World,
    player: PlayerController,
    /// Camera state managing orientation and view mode
    camera_state: CameraState,
    catalog: Rc<ItemCatalog>,
    inventory: Box<dyn InventoryStore>,
    npcs: Box<dyn NpcController>,
    renderer: Box<dyn Renderer>,
    /// Events waiting for the next tick
    input: InputQueue,
    /// Movement keys currently held
    player_actions: MovementInput,
    pointer_locked: bool,
    selected_block: BlockType,
    selected_hotbar_slot: usize,
    targeted_block: Option<RaycastHit>,
    health: u32,
    hunger: u32,
    callbacks: Callbacks,
    config: EngineConfig,
}

impl EngineState {
    /// Creates an engine with a freshly generated world, the built-in item
    /// catalog, the starting inventory and no NPCs.
    pub fn new(config: EngineConfig, renderer: Box<dyn Renderer>) -> Self {
        let catalog = Rc::new(ItemCatalog::builtin());
        let inventory = Box::new(Inventory::with_starting_items(&catalog));
        let world = World::new(&config);
        Self::from_parts(config, world, catalog, inventory, Box::new(IdleNpcs), renderer)
    }

    /// Creates an engine from already built collaborators.
    pub fn from_parts(
        config: EngineConfig,
        world: World,
        catalog: Rc<ItemCatalog>,
        inventory: Box<dyn InventoryStore>,
        npcs: Box<dyn NpcController>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let spawn = Self::spawn_position(&world, &config);
        info!("Spawning player at {:?}", spawn);

        let player = PlayerController::new(spawn, config.player.clone());
        let camera_state = CameraState::new(spawn, &config.controls);

        Self {
            world,
            player,
            camera_state,
            catalog,
            inventory,
            npcs,
            renderer,
            input: InputQueue::default(),
            player_actions: MovementInput::default(),
            pointer_locked: false,
            selected_block: BlockType::GRASS,
            selected_hotbar_slot: 0,
            targeted_block: None,
            health: MAX_VITAL,
            hunger: MAX_VITAL,
            callbacks: Callbacks::default(),
            config,
        }
    }

    /// Above the column at the origin, never inside the terrain.
    fn spawn_position(world: &World, config: &EngineConfig) -> Point3<f32> {
        let mut height = config.player.spawn_height;
        if let Some(surface) = world.surface_height(0, 0) {
            height = height.max(surface as f32 + config.player.foot_offset + 1.0);
        }
        Point3::new(0.5, height, 0.5)
    }

    /// Queues an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advances the simulation by `dt` and submits a frame.
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();

        for event in self.input.drain() {
            self.process_input(event);
        }

        let world = &self.world;
        self.player.update(
            dt,
            &self.camera_state.camera,
            self.player_actions,
            |x, y, z| world.is_solid_at(x, y, z),
        );
        self.camera_state.sync(self.player.position);

        self.npcs.update(dt, self.player.position);

        self.targeted_block = self.cast_view_ray();

        let camera = &self.camera_state.camera;
        let frame = Frame {
            view_position: camera.view_position(),
            view_matrix: camera.calc_matrix(),
            world: &self.world,
            highlight: self.targeted_block.map(|hit| hit.position),
        };
        self.renderer.render(&frame);
    }

    /// Tells the renderer the output surface changed size.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        debug!("Surface resized to {}x{}", width, height);
        self.renderer.resize(width, height);
    }

    fn process_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerLockChanged(locked) => {
                if self.pointer_locked != locked {
                    info!("Pointer lock {}", if locked { "acquired" } else { "released" });
                }
                self.pointer_locked = locked;
                if !locked {
                    self.player_actions = MovementInput::default();
                }
            }
            InputEvent::KeyDown(code) => self.key_down(code),
            InputEvent::KeyUp(code) => self.set_movement_key(code, false),
            InputEvent::MouseMotion { delta_x, delta_y } => {
                if self.pointer_locked {
                    self.camera_state.apply_look(delta_x, delta_y);
                }
            }
            InputEvent::MouseDown(button) => {
                if !self.pointer_locked {
                    return;
                }
                match button {
                    MouseButton::Left => self.destroy_targeted_block(),
                    MouseButton::Right => self.place_selected_block(),
                    _ => {}
                }
            }
        }
    }

    fn key_down(&mut self, code: KeyCode) {
        if let Some(slot) = hotbar_slot_for(code) {
            self.set_selected_hotbar_slot(slot);
            return;
        }
        match code {
            KeyCode::KeyF => self.camera_state.toggle_mode(),
            KeyCode::Space => {
                if self.pointer_locked {
                    self.player.jump();
                }
            }
            _ => {
                if self.pointer_locked {
                    self.set_movement_key(code, true);
                }
            }
        }
    }

    fn set_movement_key(&mut self, code: KeyCode, held: bool) {
        match code {
            KeyCode::KeyW => self.player_actions.forward = held,
            KeyCode::KeyS => self.player_actions.backward = held,
            KeyCode::KeyA => self.player_actions.left = held,
            KeyCode::KeyD => self.player_actions.right = held,
            _ => {}
        }
    }

    /// Casts the targeting ray from the eye along the view direction.
    fn cast_view_ray(&self) -> Option<RaycastHit> {
        let camera = &self.camera_state.camera;
        let ray = Ray::new(camera.position, camera.forward());
        self.world.raycast(&ray, &self.config.raycast)
    }

    fn destroy_targeted_block(&mut self) {
        let Some(hit) = self.cast_view_ray() else {
            return;
        };
        let target = hit.position;
        if !self
            .world
            .set_block(target.x, target.y, target.z, BlockType::AIR)
        {
            return;
        }
        debug!("Destroyed {:?} at {:?}", hit.block_type, target);

        if let Some(item) = self.catalog.block_item(hit.block_type).copied() {
            let leftover = self.inventory.add_item(&item, 1);
            if leftover > 0 {
                debug!("Inventory full, dropped {} {}", leftover, item.id);
            }
            self.notify_inventory();
        }
    }

    fn place_selected_block(&mut self) {
        let Some(hit) = self.cast_view_ray() else {
            return;
        };
        let Some(block_type) = self
            .inventory
            .slot(self.selected_hotbar_slot)
            .and_then(|stack| stack.item.block_type)
        else {
            return;
        };

        let target = hit.placement;
        if self.world.set_block(target.x, target.y, target.z, block_type) {
            debug!("Placed {:?} at {:?}", block_type, target);
            self.inventory.remove_item(self.selected_hotbar_slot, 1);
            self.notify_inventory();
        }
    }

    fn notify_inventory(&mut self) {
        if let Some(callback) = self.callbacks.inventory.as_mut() {
            callback(&self.inventory.slots()[..HOTBAR_SIZE]);
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera_state.camera
    }

    pub fn catalog(&self) -> &Rc<ItemCatalog> {
        &self.catalog
    }

    pub fn inventory(&self) -> &dyn InventoryStore {
        self.inventory.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// The block hit by the view ray at the end of the last tick.
    pub fn targeted_block(&self) -> Option<RaycastHit> {
        self.targeted_block
    }

    pub fn set_selected_block(&mut self, block_type: BlockType) {
        self.selected_block = block_type;
    }

    pub fn selected_block(&self) -> BlockType {
        self.selected_block
    }

    pub fn selected_hotbar_slot(&self) -> usize {
        self.selected_hotbar_slot
    }

    /// Selects a hotbar slot. Indices outside the hotbar are ignored.
    ///
    /// If the slot holds a placeable item, the selected block follows it.
    pub fn set_selected_hotbar_slot(&mut self, slot: usize) {
        if slot >= HOTBAR_SIZE {
            return;
        }
        self.selected_hotbar_slot = slot;
        if let Some(block_type) = self
            .inventory
            .slot(slot)
            .and_then(|stack| stack.item.block_type)
        {
            self.selected_block = block_type;
        }
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.camera_state.set_sensitivity(sensitivity);
    }

    pub fn sensitivity(&self) -> f32 {
        self.camera_state.sensitivity()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        MAX_VITAL
    }

    pub fn hunger(&self) -> u32 {
        self.hunger
    }

    pub fn max_hunger(&self) -> u32 {
        MAX_VITAL
    }

    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(MAX_VITAL);
        if let Some(callback) = self.callbacks.health.as_mut() {
            callback(self.health, MAX_VITAL);
        }
    }

    pub fn set_hunger(&mut self, hunger: u32) {
        self.hunger = hunger.min(MAX_VITAL);
        if let Some(callback) = self.callbacks.hunger.as_mut() {
            callback(self.hunger, MAX_VITAL);
        }
    }

    /// Registers the hotbar listener and immediately sends it the current hotbar.
    pub fn set_inventory_callback(&mut self, callback: impl FnMut(&[Option<ItemStack>]) + 'static) {
        self.callbacks.inventory = Some(Box::new(callback));
        self.notify_inventory();
    }

    pub fn set_health_callback(&mut self, callback: impl FnMut(u32, u32) + 'static) {
        self.callbacks.health = Some(Box::new(callback));
    }

    pub fn set_hunger_callback(&mut self, callback: impl FnMut(u32, u32) + 'static) {
        self.callbacks.hunger = Some(Box::new(callback));
    }

    pub fn save_snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    /// Replaces the chunks listed in `snapshot`. The world is untouched on error.
    pub fn load_snapshot(&mut self, snapshot: &WorldSnapshot) -> Result<usize, SnapshotError> {
        let loaded = self.world.load_snapshot(snapshot)?;
        self.targeted_block = None;
        Ok(loaded)
    }
}

/// Hotbar slot selected by a number key.
pub fn hotbar_slot_for(code: KeyCode) -> Option<usize> {
    let slot = match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        KeyCode::Digit9 => 8,
        _ => return None,
    };
    Some(slot)
}
