//! Renderer data - GPU resources only
//!
//! NO METHODS. Just data.
//! All transformations happen in renderer_operations.rs

use super::mesh::MeshLibrary;
use super::pipelines::Pipelines;
use super::shadow_map::ShadowMap;
use super::texture::GpuTexture;
use crate::camera::Viewport;

/// Uniform buffer and bind group of one scene object, indexed like
/// `SceneData::objects`
pub struct ObjectBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

pub struct TextureBinding {
    pub texture: GpuTexture,
    pub bind_group: wgpu::BindGroup,
}

pub struct RendererData {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub viewport: Viewport,

    /// Camera depth buffer, sized to the viewport
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,

    pub shadow_map: ShadowMap,
    pub pipelines: Pipelines,
    pub meshes: MeshLibrary,

    /// Single per-frame uniform read by both passes
    pub frame_buffer: wgpu::Buffer,
    /// Frame uniform only; bound while the shadow map is the attachment
    pub depth_frame_bind_group: wgpu::BindGroup,
    /// Frame uniform plus shadow map and comparison sampler
    pub main_frame_bind_group: wgpu::BindGroup,

    pub objects: Vec<ObjectBinding>,
    /// Absent when the window quad stage is disabled
    pub window_texture: Option<TextureBinding>,
}
