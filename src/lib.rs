#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A chunked voxel world that a first-person player walks through and edits
//! block by block.
//!
//! This crate provides procedural terrain, face-culled chunk meshes, world
//! storage with exact world/chunk coordinate translation, ray-based block
//! targeting and a gravity-driven player controller, tied together by a
//! single-threaded engine loop.
//!
//! ## Key Modules
//!
//! * `application_state` - Manages the window, GPU setup, pointer lock and input translation
//! * `engine_state` - The simulation: voxels, meshing, player, camera, items and the tick loop,
//!   plus the wgpu renderer that draws it
//!
//! ## Architecture
//!
//! The engine follows a modular architecture with clear separation between:
//! * Platform plumbing (winit window and events, wgpu surface and device)
//! * Voxel data, generation and meshing
//! * Player physics and camera
//! * Collaborators behind traits (inventory, NPCs, renderer)
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_sandbox::run();
//! }
//! ```
//!
//! The engine can also be driven without a window:
//!
//! ```
//! use voxel_sandbox::{BlockType, EngineConfig, EngineState, LogRenderer};
//! use web_time::Duration;
//!
//! let mut config = EngineConfig::default();
//! config.world.chunk_radius = 0;
//! let mut engine = EngineState::new(config, Box::new(LogRenderer::new()));
//! engine.tick(Duration::from_millis(16));
//! assert_eq!(engine.world().get_block(0, 0, 0), BlockType::STONE);
//! ```

use application_state::ApplicationState;
use log::{error, info};
use winit::event_loop::{ControlFlow, EventLoop};

pub mod application_state;
pub mod engine_state;

pub use application_state::input_state::{InputEvent, InputQueue};
pub use engine_state::{
    camera_state::camera::{Camera, CameraMode, CameraUniform, Projection},
    config::{
        ConfigError, ControlsConfig, EngineConfig, PlayerConfig, RaycastConfig, TerrainConfig,
        TerrainMethod, WorldConfig,
    },
    items::{Inventory, InventoryStore, ItemCatalog, ItemDefinition, ItemKind, ItemStack},
    npc::{IdleNpcs, NpcController},
    player::{MovementInput, PlayerController, PlayerState},
    rendering::{meshing::ChunkMesh, Frame, LogRenderer, PipelineManager, Renderer, Vertex},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        chunk::{chunk_generation::TerrainGenerator, Chunk, ChunkPosition, CHUNK_HEIGHT, CHUNK_SIZE},
        raycast::{Ray, RaycastHit},
        snapshot::{ChunkSnapshot, SnapshotError, WorldSnapshot},
        world::{chunk_to_world, world_to_chunk, World},
    },
    EngineState,
};

/// Opens a window and runs the engine until it is closed.
///
/// Configuration is read from the file named by `VOXEL_CONFIG`, falling
/// back to defaults.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = EngineConfig::from_env();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            error!("Could not create the event loop: {err}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut state = ApplicationState::new(config);

    if let Err(err) = event_loop.run_app(&mut state) {
        error!("Event loop stopped with an error: {err}");
    }
}
