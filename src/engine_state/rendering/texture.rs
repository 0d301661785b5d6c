//! Texture handling for the rendering pipeline.
//!
//! This module provides the depth buffer and the block texture atlas. The atlas
//! is painted procedurally: every tile is a base colour with seeded speckle, so
//! no image assets have to ship with the binary.

use wgpu::util::DeviceExt;

use crate::engine_state::voxels::block::ATLAS_TILES_PER_ROW;

/// Edge length of one atlas tile in pixels.
pub const TILE_PIXELS: usize = 16;
/// Edge length of the whole atlas in pixels.
pub const ATLAS_PIXELS: usize = TILE_PIXELS * ATLAS_TILES_PER_ROW;

/// Base colours of the tiles that blocks use, by tile index.
const TILE_COLORS: [[u8; 3]; 7] = [
    [95, 159, 53],   // grass top
    [134, 96, 67],   // grass side, green band painted on top
    [134, 96, 67],   // dirt
    [125, 125, 125], // stone
    [102, 81, 50],   // wood bark
    [160, 130, 80],  // wood rings
    [58, 120, 38],   // leaves
];
/// Colour of tiles no block uses.
const UNUSED_TILE_COLOR: [u8; 3] = [255, 0, 255];
/// Rows of grass drawn along the top of the grass side tile.
const GRASS_SIDE_BAND: usize = 4;

/// Represents a GPU texture with associated view and sampler.
pub struct Texture {
    /// The underlying WebGPU texture resource.
    #[allow(dead_code)]
    pub texture: wgpu::Texture,
    /// The texture view used for binding the texture to the pipeline.
    pub view: wgpu::TextureView,
    /// The sampler used for texture filtering and addressing.
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// The texture format used for depth buffers.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a depth texture matching the surface size.
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        };

        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Uploads the block atlas.
    pub fn create_block_atlas(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let size = wgpu::Extent3d {
            width: ATLAS_PIXELS as u32,
            height: ATLAS_PIXELS as u32,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Block Atlas"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &atlas_pixels(),
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Nearest filtering keeps neighbouring tiles from bleeding into each other
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// RGBA8 pixels of the block atlas, row-major from the top-left corner.
pub fn atlas_pixels() -> Vec<u8> {
    let mut pixels = vec![0u8; ATLAS_PIXELS * ATLAS_PIXELS * 4];

    for tile in 0..ATLAS_TILES_PER_ROW * ATLAS_TILES_PER_ROW {
        let origin_x = (tile % ATLAS_TILES_PER_ROW) * TILE_PIXELS;
        let origin_y = (tile / ATLAS_TILES_PER_ROW) * TILE_PIXELS;
        let mut rng = fastrand::Rng::with_seed(tile as u64);

        for y in 0..TILE_PIXELS {
            for x in 0..TILE_PIXELS {
                let [r, g, b] = tile_texel(tile, x, y, &mut rng);
                let index = ((origin_y + y) * ATLAS_PIXELS + origin_x + x) * 4;
                pixels[index..index + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
    }

    pixels
}

fn tile_texel(tile: usize, x: usize, y: usize, rng: &mut fastrand::Rng) -> [u8; 3] {
    let Some(base) = TILE_COLORS.get(tile).copied() else {
        return UNUSED_TILE_COLOR;
    };
    let base = match tile {
        1 if y < GRASS_SIDE_BAND => TILE_COLORS[0],
        // bark stripes
        4 if x % 4 == 0 => darken(base, 20),
        // growth rings
        5 => {
            let dx = x.abs_diff(TILE_PIXELS / 2);
            let dy = y.abs_diff(TILE_PIXELS / 2);
            if dx.max(dy) % 3 == 0 {
                darken(base, 30)
            } else {
                base
            }
        }
        _ => base,
    };
    darken(base, rng.u8(0..24))
}

fn darken(color: [u8; 3], amount: u8) -> [u8; 3] {
    color.map(|channel| channel.saturating_sub(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{
        block_side::BlockSide, block_type::BlockType, texture_index, tile_uv_bounds,
    };

    fn texel(pixels: &[u8], x: usize, y: usize) -> [u8; 4] {
        let index = (y * ATLAS_PIXELS + x) * 4;
        [pixels[index], pixels[index + 1], pixels[index + 2], pixels[index + 3]]
    }

    /// Pixel at the centre of the tile a block face samples.
    fn face_texel(pixels: &[u8], block_type: BlockType, side: BlockSide) -> [u8; 4] {
        let (u_min, v_min, u_max, v_max) = tile_uv_bounds(texture_index(block_type, side));
        let x = ((u_min + u_max) / 2.0 * ATLAS_PIXELS as f32) as usize;
        let y = ((v_min + v_max) / 2.0 * ATLAS_PIXELS as f32) as usize;
        texel(pixels, x, y)
    }

    #[test]
    fn atlas_is_square_and_opaque() {
        let pixels = atlas_pixels();
        assert_eq!(pixels.len(), 256 * 256 * 4);
        assert!(pixels.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn atlas_is_reproducible() {
        assert_eq!(atlas_pixels(), atlas_pixels());
    }

    #[test]
    fn stone_is_grey_and_grass_top_is_green() {
        let pixels = atlas_pixels();
        let [r, g, b, _] = face_texel(&pixels, BlockType::STONE, BlockSide::FRONT);
        assert!(r == g && g == b);
        let [r, g, b, _] = face_texel(&pixels, BlockType::GRASS, BlockSide::TOP);
        assert!(g > r && g > b);
    }

    #[test]
    fn grass_side_has_green_band_over_dirt() {
        let pixels = atlas_pixels();
        let tile = texture_index(BlockType::GRASS, BlockSide::LEFT);
        let origin_x = (tile % ATLAS_TILES_PER_ROW) * TILE_PIXELS;
        let origin_y = (tile / ATLAS_TILES_PER_ROW) * TILE_PIXELS;

        let [r, g, _, _] = texel(&pixels, origin_x + 3, origin_y);
        assert!(g > r);
        let [r, g, _, _] = texel(&pixels, origin_x + 3, origin_y + TILE_PIXELS - 1);
        assert!(r > g);
    }

    #[test]
    fn unused_tiles_are_magenta() {
        let pixels = atlas_pixels();
        let tile = ATLAS_TILES_PER_ROW * ATLAS_TILES_PER_ROW - 1;
        let x = (tile % ATLAS_TILES_PER_ROW) * TILE_PIXELS;
        let y = (tile / ATLAS_TILES_PER_ROW) * TILE_PIXELS;
        assert_eq!(texel(&pixels, x, y), [255, 0, 255, 255]);
    }
}
