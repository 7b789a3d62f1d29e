//! Shadow map render target
//!
//! A square depth texture the depth pass renders into and the main pass
//! samples with a comparison sampler. Allocation is checked once at startup;
//! a frame never renders against an incomplete target.

use crate::constants::render::SHADOW_FORMAT;
use crate::error::{EngineError, EngineResult};

pub struct ShadowMap {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub resolution: u32,
}

/// Reject resolutions the device cannot allocate
pub fn check_shadow_map_resolution(resolution: u32, max_dimension: u32) -> EngineResult<()> {
    if resolution == 0 || resolution > max_dimension {
        return Err(EngineError::ShadowMapUnavailable {
            resolution,
            error: format!("device supports at most {} texels per side", max_dimension),
        });
    }
    Ok(())
}

pub fn create_shadow_map(device: &wgpu::Device, resolution: u32) -> EngineResult<ShadowMap> {
    check_shadow_map_resolution(resolution, device.limits().max_texture_dimension_2d)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Shadow Map"),
        size: wgpu::Extent3d {
            width: resolution,
            height: resolution,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: SHADOW_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some("Shadow Map View"),
        ..Default::default()
    });

    let out_of_memory = pollster::block_on(device.pop_error_scope());
    let validation = pollster::block_on(device.pop_error_scope());
    if let Some(error) = out_of_memory.or(validation) {
        log::error!(
            "[ShadowMap] {}x{} depth target is incomplete: {}",
            resolution,
            resolution,
            error
        );
        return Err(EngineError::ShadowMapUnavailable {
            resolution,
            error: error.to_string(),
        });
    }

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Shadow Sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        compare: Some(wgpu::CompareFunction::LessEqual),
        ..Default::default()
    });

    log::info!(
        "[ShadowMap] Created {}x{} {:?} shadow map",
        resolution,
        resolution,
        SHADOW_FORMAT
    );

    Ok(ShadowMap {
        texture,
        view,
        sampler,
        resolution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_within_limits_is_accepted() {
        assert!(check_shadow_map_resolution(1024, 8192).is_ok());
        assert!(check_shadow_map_resolution(8192, 8192).is_ok());
    }

    #[test]
    fn test_resolution_beyond_limits_is_unavailable() {
        let err = check_shadow_map_resolution(16384, 8192).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ShadowMapUnavailable { resolution: 16384, .. }
        ));
        assert!(check_shadow_map_resolution(0, 8192).is_err());
    }
}
