//! Bind group layouts and render pipelines
//!
//! Group 0 holds per-frame data, group 1 per-object data, group 2 the window
//! texture. The depth pass gets its own frame layout without the shadow map,
//! since a texture cannot be sampled while it is the depth attachment.

use super::uniforms::{FrameUniform, ObjectUniform};
use super::vertex::Vertex;
use crate::constants::render::{DEPTH_FORMAT, SHADOW_FORMAT};
use crate::error::{EngineError, EngineResult};

pub struct BindGroupLayouts {
    pub depth_frame: wgpu::BindGroupLayout,
    pub main_frame: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
}

pub struct Pipelines {
    pub layouts: BindGroupLayouts,
    pub depth: wgpu::RenderPipeline,
    pub phong: wgpu::RenderPipeline,
    pub lamp: wgpu::RenderPipeline,
    pub window: wgpu::RenderPipeline,
}

fn uniform_entry(binding: u32, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(size as u64),
        },
        count: None,
    }
}

pub fn create_bind_group_layouts(device: &wgpu::Device) -> BindGroupLayouts {
    let frame_size = std::mem::size_of::<FrameUniform>();

    let depth_frame = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Depth Frame Layout"),
        entries: &[uniform_entry(0, frame_size)],
    });

    let main_frame = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Main Frame Layout"),
        entries: &[
            uniform_entry(0, frame_size),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Depth,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ],
    });

    let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Object Layout"),
        entries: &[uniform_entry(0, std::mem::size_of::<ObjectUniform>())],
    });

    let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Window Texture Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    BindGroupLayouts {
        depth_frame,
        main_frame,
        object,
        texture,
    }
}

/// Opaque or blended colour output
fn color_target(
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(blend),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

fn depth_state(
    format: wgpu::TextureFormat,
    write: bool,
    bias: wgpu::DepthBiasState,
) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias,
    }
}

fn primitive(cull_mode: Option<wgpu::Face>) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode,
        unclipped_depth: false,
        polygon_mode: wgpu::PolygonMode::Fill,
        conservative: false,
    }
}

fn create_shader(
    device: &wgpu::Device,
    name: &str,
    descriptor: wgpu::ShaderModuleDescriptor,
) -> EngineResult<wgpu::ShaderModule> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(descriptor);
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        log::error!("[Pipelines] Shader {} failed to compile: {}", name, error);
        return Err(EngineError::ShaderCompilation {
            source: name.to_string(),
            error: error.to_string(),
        });
    }
    Ok(module)
}

/// Build all pipelines. Validation failures surface as errors instead of a
/// panic in the device error handler.
pub fn create_pipelines(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
) -> EngineResult<Pipelines> {
    let depth_shader = create_shader(
        device,
        "depth.wgsl",
        wgpu::include_wgsl!("shaders/depth.wgsl"),
    )?;
    let phong_shader = create_shader(
        device,
        "phong.wgsl",
        wgpu::include_wgsl!("shaders/phong.wgsl"),
    )?;
    let lamp_shader = create_shader(
        device,
        "lamp.wgsl",
        wgpu::include_wgsl!("shaders/lamp.wgsl"),
    )?;
    let window_shader = create_shader(
        device,
        "window.wgsl",
        wgpu::include_wgsl!("shaders/window.wgsl"),
    )?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let layouts = create_bind_group_layouts(device);

    let depth_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Depth Pipeline Layout"),
        bind_group_layouts: &[&layouts.depth_frame, &layouts.object],
        push_constant_ranges: &[],
    });
    let lit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Lit Pipeline Layout"),
        bind_group_layouts: &[&layouts.main_frame, &layouts.object],
        push_constant_ranges: &[],
    });
    let window_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Window Pipeline Layout"),
        bind_group_layouts: &[&layouts.main_frame, &layouts.object, &layouts.texture],
        push_constant_ranges: &[],
    });

    let depth = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Depth Pipeline"),
        layout: Some(&depth_layout),
        vertex: wgpu::VertexState {
            module: &depth_shader,
            entry_point: "vs_main",
            buffers: &[Vertex::position_only_layout()],
        },
        fragment: None,
        // Both faces, so thin casters still land in the map
        primitive: primitive(None),
        depth_stencil: Some(depth_state(
            SHADOW_FORMAT,
            true,
            wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        )),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    let phong = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Phong Pipeline"),
        layout: Some(&lit_layout),
        vertex: wgpu::VertexState {
            module: &phong_shader,
            entry_point: "vs_main",
            buffers: &[Vertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &phong_shader,
            entry_point: "fs_main",
            targets: &color_target(surface_format, wgpu::BlendState::REPLACE),
        }),
        primitive: primitive(Some(wgpu::Face::Back)),
        depth_stencil: Some(depth_state(DEPTH_FORMAT, true, wgpu::DepthBiasState::default())),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    let lamp = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Lamp Pipeline"),
        layout: Some(&lit_layout),
        vertex: wgpu::VertexState {
            module: &lamp_shader,
            entry_point: "vs_main",
            buffers: &[Vertex::position_only_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &lamp_shader,
            entry_point: "fs_main",
            targets: &color_target(surface_format, wgpu::BlendState::REPLACE),
        }),
        primitive: primitive(Some(wgpu::Face::Back)),
        depth_stencil: Some(depth_state(DEPTH_FORMAT, true, wgpu::DepthBiasState::default())),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    // Blended after all opaque draws: tests depth, never writes it
    let window = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Window Pipeline"),
        layout: Some(&window_layout),
        vertex: wgpu::VertexState {
            module: &window_shader,
            entry_point: "vs_main",
            buffers: &[Vertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &window_shader,
            entry_point: "fs_main",
            targets: &color_target(surface_format, wgpu::BlendState::ALPHA_BLENDING),
        }),
        primitive: primitive(None),
        depth_stencil: Some(depth_state(DEPTH_FORMAT, false, wgpu::DepthBiasState::default())),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        log::error!("[Pipelines] Pipeline creation failed: {}", error);
        return Err(EngineError::RenderPipelineError {
            error: error.to_string(),
        });
    }

    log::info!("[Pipelines] Created depth, phong, lamp and window pipelines");

    Ok(Pipelines {
        layouts,
        depth,
        phong,
        lamp,
        window,
    })
}
