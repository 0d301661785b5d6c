//! # Voxel Sandbox Application Entry Point
//!
//! This is the main entry point for the native application.
//! It simply calls into the library's `run()` function to initialize and start the engine.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info VOXEL_CONFIG=config.json cargo run --release
//! ```

fn main() {
    voxel_sandbox::run();
}
