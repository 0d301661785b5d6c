//! # Engine Configuration
//!
//! Tunable constants for terrain generation, player physics, targeting and
//! controls. Every field has a default, so a config file only needs to name the
//! values it changes:
//!
//! ```json
//! { "world": { "chunk_radius": 2 }, "terrain": { "method": "perlin", "seed": 7 } }
//! ```
//!
//! The file is located through the `VOXEL_CONFIG` environment variable.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_CONFIG";

/// Errors raised while reading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Height function used to shape the terrain surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainMethod {
    /// Product of two low-frequency sinusoids around a base height of 20.
    #[default]
    Sinusoid,
    /// 2D Perlin noise around the same base height.
    Perlin,
    /// Every column has the same height (`flat_height`). Useful for testing.
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u64,
    pub method: TerrainMethod,
    pub flat_height: i32,
    /// Chance per column of growing a tree.
    pub tree_probability: f32,
    /// Trees only grow on columns strictly lower than this.
    pub tree_max_terrain_height: i32,
    /// Chance for each candidate leaf cell to be filled.
    pub leaf_probability: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            method: TerrainMethod::Sinusoid,
            flat_height: 20,
            tree_probability: 0.05,
            tree_max_terrain_height: 35,
            leaf_probability: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks from `-chunk_radius` to `chunk_radius` on both axes are generated at startup.
    pub chunk_radius: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { chunk_radius: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub jump_speed: f32,
    /// Vertical acceleration, negative is down.
    pub gravity: f32,
    /// Distance from the eye down to the feet.
    pub foot_offset: f32,
    /// Eye height the player spawns at.
    pub spawn_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            jump_speed: 8.0,
            gravity: -20.0,
            foot_offset: 1.8,
            spawn_height: 35.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    pub step: f32,
    pub max_distance: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            max_distance: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// User facing mouse sensitivity multiplier.
    pub sensitivity: f32,
    /// Radians of rotation per pixel of mouse movement at sensitivity 1.
    pub look_scale: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            look_scale: 0.002,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub terrain: TerrainConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub raycast: RaycastConfig,
    pub controls: ControlsConfig,
}

impl EngineConfig {
    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Loads the config named by `VOXEL_CONFIG`, falling back to defaults when
    /// the variable is unset or the file cannot be used.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::from_path(&path) {
            Ok(config) => {
                info!("Loaded config from {path}");
                config
            }
            Err(err) => {
                warn!("Ignoring config at {path}: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.world.chunk_radius, 4);
        assert_relative_eq!(config.player.foot_offset, 1.8);
        assert_relative_eq!(config.raycast.step, 0.1);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "terrain": { "method": "flat", "flat_height": 12 }, "player": { "gravity": -9.8 } }"#,
        )
        .unwrap();
        assert_eq!(config.terrain.method, TerrainMethod::Flat);
        assert_eq!(config.terrain.flat_height, 12);
        assert_relative_eq!(config.terrain.tree_probability, 0.05);
        assert_relative_eq!(config.player.gravity, -9.8);
        assert_relative_eq!(config.player.jump_speed, 8.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            EngineConfig::from_json("{ \"world\": "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            EngineConfig::from_path("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
