//! # Chunk Generation Module
//!
//! Procedural terrain for new chunks. Generation happens in two passes:
//!
//! 1. Every column is filled from a height function of its world X/Z:
//!    stone up to five blocks below the surface, then dirt, then a single
//!    grass block on top.
//! 2. Trees are planted on some of the lower columns: a wooden trunk of 4 to 6
//!    blocks capped with a loose cluster of leaves.
//!
//! Tree placement draws from a random generator seeded by the world seed and
//! the chunk position, so the same chunk always grows the same trees.

use noise::{NoiseFn, Perlin};

use super::{Chunk, ChunkPosition, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::engine_state::config::{TerrainConfig, TerrainMethod};
use crate::engine_state::voxels::block::block_type::BlockType;

/// Surface height the height functions oscillate around.
const BASE_HEIGHT: f64 = 20.0;
/// Maximum deviation from `BASE_HEIGHT`.
const HEIGHT_AMPLITUDE: f64 = 10.0;
/// Frequency of the sinusoid height function.
const SINUSOID_FREQUENCY: f64 = 0.05;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
const PERLIN_SCALE_FACTOR: f64 = 0.02;
/// Number of dirt blocks (including the grass block) above the stone.
const SOIL_DEPTH: i32 = 5;
/// Shortest tree trunk.
const MIN_TRUNK_HEIGHT: i32 = 4;
/// Number of different trunk heights above the minimum.
const TRUNK_HEIGHT_VARIANCE: i32 = 3;
/// Horizontal reach of the leaf cluster from the trunk.
const LEAF_RADIUS: i32 = 2;
/// Number of leaf layers starting at the top trunk block.
const LEAF_LAYERS: i32 = 3;

/// Fills chunks with terrain and trees.
pub struct TerrainGenerator {
    config: TerrainConfig,
    perlin: Perlin,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        let perlin = Perlin::new(config.seed as u32);
        Self { config, perlin }
    }

    /// Surface height of the column at world coordinates `(world_x, world_z)`.
    ///
    /// Blocks with `y < height` are solid ground. The result is always within
    /// `1..CHUNK_HEIGHT`.
    pub fn terrain_height(&self, world_x: i32, world_z: i32) -> i32 {
        let (x, z) = (world_x as f64, world_z as f64);
        let height = match self.config.method {
            TerrainMethod::Sinusoid => {
                BASE_HEIGHT
                    + HEIGHT_AMPLITUDE
                        * (x * SINUSOID_FREQUENCY).sin()
                        * (z * SINUSOID_FREQUENCY).cos()
            }
            TerrainMethod::Perlin => {
                let sample = self
                    .perlin
                    .get([x * PERLIN_SCALE_FACTOR, z * PERLIN_SCALE_FACTOR]);
                BASE_HEIGHT + HEIGHT_AMPLITUDE * sample
            }
            TerrainMethod::Flat => self.config.flat_height as f64,
        };

        (height.floor() as i32).clamp(1, CHUNK_HEIGHT - 1)
    }

    /// Generates the chunk at `position`. The returned chunk has no mesh yet.
    pub fn generate(&self, position: ChunkPosition) -> Chunk {
        let mut chunk = Chunk::empty(position);
        let origin = position.world_origin();

        let mut heights = [[0; CHUNK_SIZE as usize]; CHUNK_SIZE as usize];
        for (x, row) in heights.iter_mut().enumerate() {
            for (z, height) in row.iter_mut().enumerate() {
                *height = self.terrain_height(origin.x + x as i32, origin.z + z as i32);
                fill_column(&mut chunk, x as i32, z as i32, *height);
            }
        }

        let mut rng = fastrand::Rng::with_seed(self.chunk_seed(position));
        for (x, row) in heights.iter().enumerate() {
            for (z, height) in row.iter().enumerate() {
                if rng.f32() < self.config.tree_probability
                    && *height < self.config.tree_max_terrain_height
                {
                    self.plant_tree(&mut chunk, &mut rng, x as i32, *height, z as i32);
                }
            }
        }

        chunk
    }

    /// Mixes the world seed with the chunk position.
    fn chunk_seed(&self, position: ChunkPosition) -> u64 {
        self.config.seed
            ^ (position.x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (position.z as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
    }

    /// Grows a tree whose trunk starts at `base_y` in column `(x, z)`.
    fn plant_tree(&self, chunk: &mut Chunk, rng: &mut fastrand::Rng, x: i32, base_y: i32, z: i32) {
        let trunk_height = MIN_TRUNK_HEIGHT + rng.i32(0..TRUNK_HEIGHT_VARIANCE);
        for dy in 0..trunk_height {
            chunk.set_block(x, base_y + dy, z, BlockType::WOOD);
        }

        let leaf_y = base_y + trunk_height - 1;
        for dx in -LEAF_RADIUS..=LEAF_RADIUS {
            for dy in 0..LEAF_LAYERS {
                for dz in -LEAF_RADIUS..=LEAF_RADIUS {
                    let (lx, ly, lz) = (x + dx, leaf_y + dy, z + dz);
                    if Chunk::index_of(lx, ly, lz).is_none() {
                        continue;
                    }
                    // Leaves only take air, so the top trunk block stays wood
                    if rng.f32() < self.config.leaf_probability
                        && chunk.get_block(lx, ly, lz) == BlockType::AIR
                    {
                        chunk.set_block(lx, ly, lz, BlockType::LEAVES);
                    }
                }
            }
        }
    }
}

/// Fills one column with stone, dirt and a grass cap up to `height`.
fn fill_column(chunk: &mut Chunk, x: i32, z: i32, height: i32) {
    for y in 0..height.min(CHUNK_HEIGHT) {
        let block_type = if y < height - SOIL_DEPTH {
            BlockType::STONE
        } else if y < height - 1 {
            BlockType::DIRT
        } else {
            BlockType::GRASS
        };
        chunk.set_block(x, y, z, block_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(height: i32) -> TerrainConfig {
        TerrainConfig {
            method: TerrainMethod::Flat,
            flat_height: height,
            tree_probability: 0.0,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn columns_are_layered_stone_dirt_grass() {
        let chunk = TerrainGenerator::new(flat(20)).generate(ChunkPosition::new(0, 0));
        assert_eq!(chunk.get_block(3, 14, 3), BlockType::STONE);
        assert_eq!(chunk.get_block(3, 15, 3), BlockType::DIRT);
        assert_eq!(chunk.get_block(3, 18, 3), BlockType::DIRT);
        assert_eq!(chunk.get_block(3, 19, 3), BlockType::GRASS);
        assert_eq!(chunk.get_block(3, 20, 3), BlockType::AIR);
    }

    #[test]
    fn sinusoid_matches_reference_heights() {
        let generator = TerrainGenerator::new(TerrainConfig::default());
        assert_eq!(generator.terrain_height(0, 0), 20);
        // sin(1.5) * cos(0) * 10 = 9.97
        assert_eq!(generator.terrain_height(30, 0), 29);
        assert_eq!(generator.terrain_height(-30, 0), 10);
    }

    #[test]
    fn heights_stay_within_chunk() {
        for method in [TerrainMethod::Sinusoid, TerrainMethod::Perlin] {
            let generator = TerrainGenerator::new(TerrainConfig {
                method,
                ..TerrainConfig::default()
            });
            for x in (-200..200).step_by(7) {
                for z in (-200..200).step_by(11) {
                    let height = generator.terrain_height(x, z);
                    assert!((1..CHUNK_HEIGHT).contains(&height), "{method:?} {x} {z}");
                }
            }
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let config = TerrainConfig {
            tree_probability: 0.5,
            seed: 42,
            ..TerrainConfig::default()
        };
        let a = TerrainGenerator::new(config.clone()).generate(ChunkPosition::new(-1, 2));
        let b = TerrainGenerator::new(config).generate(ChunkPosition::new(-1, 2));
        assert_eq!(a.blocks(), b.blocks());
    }

    #[test]
    fn trees_grow_trunks_and_leaves_on_low_columns() {
        let config = TerrainConfig {
            tree_probability: 1.0,
            leaf_probability: 1.0,
            ..flat(20)
        };
        let chunk = TerrainGenerator::new(config).generate(ChunkPosition::new(0, 0));
        assert_eq!(chunk.get_block(8, 20, 8), BlockType::WOOD);
        assert_eq!(chunk.get_block(8, 23, 8), BlockType::WOOD);
        let leaves = chunk
            .blocks()
            .iter()
            .filter(|b| **b == BlockType::LEAVES)
            .count();
        assert!(leaves > 0);
    }

    #[test]
    fn leaves_do_not_replace_the_trunk_top() {
        let config = TerrainConfig {
            leaf_probability: 1.0,
            ..flat(20)
        };
        let generator = TerrainGenerator::new(config);
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
        generator.plant_tree(&mut chunk, &mut fastrand::Rng::with_seed(7), 8, 10, 8);

        let trunk_height =
            MIN_TRUNK_HEIGHT + fastrand::Rng::with_seed(7).i32(0..TRUNK_HEIGHT_VARIANCE);
        for y in 10..10 + trunk_height {
            assert_eq!(chunk.get_block(8, y, 8), BlockType::WOOD, "y = {y}");
        }
        assert_eq!(chunk.get_block(8, 10 + trunk_height, 8), BlockType::LEAVES);
        assert_eq!(chunk.get_block(9, 10 + trunk_height - 1, 8), BlockType::LEAVES);
    }

    #[test]
    fn no_trees_on_high_columns() {
        let config = TerrainConfig {
            tree_probability: 1.0,
            tree_max_terrain_height: 35,
            ..flat(40)
        };
        let chunk = TerrainGenerator::new(config).generate(ChunkPosition::new(0, 0));
        assert!(chunk
            .blocks()
            .iter()
            .all(|b| !matches!(b, BlockType::WOOD | BlockType::LEAVES)));
    }
}
