//! Window texture
//!
//! Loaded from disk when a path is configured, otherwise generated: an opaque
//! frame around tinted translucent glass.

use crate::error::{EngineError, EngineResult};
use image::{Rgba, RgbaImage};
use std::path::Path;

const PROCEDURAL_SIZE: u32 = 128;
const FRAME_WIDTH: u32 = 8;
const FRAME_COLOR: Rgba<u8> = Rgba([72, 44, 30, 255]);
const GLASS_COLOR: Rgba<u8> = Rgba([204, 64, 64, 110]);

/// Sampled texture ready for binding
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Generate the fallback window image
pub fn procedural_window_image() -> RgbaImage {
    let size = PROCEDURAL_SIZE;
    let mid = size / 2;
    RgbaImage::from_fn(size, size, |x, y| {
        let border = x < FRAME_WIDTH
            || y < FRAME_WIDTH
            || x >= size - FRAME_WIDTH
            || y >= size - FRAME_WIDTH;
        let mullion = x.abs_diff(mid) < FRAME_WIDTH / 2 || y.abs_diff(mid) < FRAME_WIDTH / 2;
        if border || mullion {
            FRAME_COLOR
        } else {
            GLASS_COLOR
        }
    })
}

/// Decode an image file to RGBA8
pub fn load_window_image(path: &Path) -> EngineResult<RgbaImage> {
    if !path.exists() {
        return Err(EngineError::TextureNotFound {
            path: path.display().to_string(),
        });
    }

    let image = image::open(path).map_err(|e| EngineError::TextureDecode {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    log::info!(
        "[Texture] Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgba8())
}

/// Configured image, or the procedural one when no path is set
pub fn resolve_window_image(path: Option<&Path>) -> EngineResult<RgbaImage> {
    match path {
        Some(path) => load_window_image(path),
        None => {
            log::debug!("[Texture] No window texture configured, generating one");
            Ok(procedural_window_image())
        }
    }
}

/// Upload an RGBA image as a clamped, linearly filtered texture
pub fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &RgbaImage,
    label: &str,
) -> EngineResult<GpuTexture> {
    let (width, height) = image.dimensions();
    let max_dimension = device.limits().max_texture_dimension_2d;
    if width == 0 || height == 0 || width > max_dimension || height > max_dimension {
        return Err(EngineError::InvalidConfig {
            field: "assets.window_texture".to_string(),
            value: format!("{}x{}", width, height),
            reason: format!("texture dimensions must be within 1..={}", max_dimension),
        });
    }

    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    // Clamp so the translucent edge never wraps onto the opposite frame
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    Ok(GpuTexture {
        texture,
        view,
        sampler,
    })
}
