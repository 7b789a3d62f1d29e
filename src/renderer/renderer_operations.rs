//! Renderer operations - device setup and the two-pass frame
//!
//! Each frame: the depth pass renders shadow casters from the light into the
//! shadow map, then the main pass renders the scene from the camera and
//! samples that map. Both passes read the light-space matrix from the same
//! uniform write.

use super::frame_plan::{plan_frame, DepthPassPlan, MainPassPlan};
use super::mesh::create_mesh_library;
use super::pipelines::create_pipelines;
use super::renderer_data::{ObjectBinding, RendererData, TextureBinding};
use super::shadow_map::create_shadow_map;
use super::texture::{resolve_window_image, upload_texture};
use super::uniforms::{build_frame_uniform, build_object_uniform, FrameUniform, FrameUniformInput};
use crate::camera::{CameraData, Viewport};
use crate::config::DemoConfig;
use crate::constants::render::{CLEAR_COLOR, DEPTH_FORMAT};
use crate::error::{EngineError, EngineResult, OptionExt};
use crate::lighting::{abort_frame, begin_depth_pass, begin_main_pass, end_frame, ShadowPassData};
use crate::scene::{Material, SceneData};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

fn create_depth_texture(
    device: &wgpu::Device,
    viewport: Viewport,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: viewport.width(),
            height: viewport.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

/// Create the device, surface and every GPU resource the scene needs
pub fn init_renderer(
    window: Arc<Window>,
    config: &DemoConfig,
    scene: &SceneData,
) -> EngineResult<RendererData> {
    log::info!("[Renderer] Initializing GPU");

    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let size = window.inner_size();
    let surface = instance.create_surface(window)?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
    }))
    .ok_or(EngineError::DeviceNotFound)?;
    log::info!("[Renderer] Using adapter: {:?}", adapter.get_info().name);

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("Illumination Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                .using_resolution(adapter.limits()),
        },
        None,
    ))?;

    let caps = surface.get_capabilities(&adapter);
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
        .ok_or_engine(|| EngineError::SurfaceError {
            error: "surface reports no supported formats".to_string(),
        })?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    // A minimised window can report zero; fall back to the configured size
    let viewport = Viewport::new(size.width, size.height)
        .or_else(|_| Viewport::new(config.window.width, config.window.height))?;

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: viewport.width(),
        height: viewport.height(),
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &surface_config);

    let (depth_texture, depth_view) = create_depth_texture(&device, viewport);
    let shadow_map = create_shadow_map(&device, config.light.shadow_map_resolution)?;
    let pipelines = create_pipelines(&device, format)?;
    let meshes = create_mesh_library(&device);

    let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Frame Uniform Buffer"),
        size: std::mem::size_of::<FrameUniform>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let depth_frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Depth Frame Bind Group"),
        layout: &pipelines.layouts.depth_frame,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: frame_buffer.as_entire_binding(),
        }],
    });

    let main_frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Main Frame Bind Group"),
        layout: &pipelines.layouts.main_frame,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&shadow_map.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&shadow_map.sampler),
            },
        ],
    });

    let objects = scene
        .objects
        .iter()
        .map(|object| {
            let uniform = build_object_uniform(object, &config.light);
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(object.name),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(object.name),
                layout: &pipelines.layouts.object,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            ObjectBinding { buffer, bind_group }
        })
        .collect();

    let window_texture = if scene.stages.enable_window_quad {
        let image = resolve_window_image(config.assets.window_texture.as_deref())?;
        let texture = upload_texture(&device, &queue, &image, "Window Texture")?;
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Window Texture Bind Group"),
            layout: &pipelines.layouts.texture,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });
        Some(TextureBinding {
            texture,
            bind_group,
        })
    } else {
        None
    };

    log::info!(
        "[Renderer] Ready: {}x{} {:?}, {} objects",
        viewport.width(),
        viewport.height(),
        format,
        scene.objects.len()
    );

    Ok(RendererData {
        surface,
        device,
        queue,
        surface_config,
        viewport,
        depth_texture,
        depth_view,
        shadow_map,
        pipelines,
        meshes,
        frame_buffer,
        depth_frame_bind_group,
        main_frame_bind_group,
        objects,
        window_texture,
    })
}

/// Adapt the surface and camera depth buffer to a new window size.
/// Returns false when the size is zero and the resize was skipped.
pub fn resize_renderer(renderer: &mut RendererData, width: u32, height: u32) -> bool {
    let viewport = match Viewport::new(width, height) {
        Ok(viewport) => viewport,
        Err(e) => {
            log::debug!("[Renderer] Skipping resize: {}", e);
            return false;
        }
    };

    renderer.viewport = viewport;
    renderer.surface_config.width = width;
    renderer.surface_config.height = height;
    renderer.surface.configure(&renderer.device, &renderer.surface_config);

    let (depth_texture, depth_view) = create_depth_texture(&renderer.device, viewport);
    renderer.depth_texture = depth_texture;
    renderer.depth_view = depth_view;

    log::debug!("[Renderer] Resized to {}x{}", width, height);
    true
}

fn encode_depth_pass(
    renderer: &RendererData,
    encoder: &mut wgpu::CommandEncoder,
    plan: &DepthPassPlan,
    scene: &SceneData,
) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Shadow Depth Pass"),
        color_attachments: &[],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &renderer.shadow_map.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    });

    let resolution = plan.resolution as f32;
    pass.set_viewport(0.0, 0.0, resolution, resolution, 0.0, 1.0);
    pass.set_pipeline(&renderer.pipelines.depth);
    pass.set_bind_group(0, &renderer.depth_frame_bind_group, &[]);

    for &index in &plan.casters {
        let (Some(object), Some(binding)) = (scene.objects.get(index), renderer.objects.get(index))
        else {
            log::warn!("[Renderer] Shadow caster {} has no GPU binding", index);
            continue;
        };
        let mesh = renderer.meshes.get(object.mesh);
        pass.set_bind_group(1, &binding.bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.draw(0..mesh.vertex_count, 0..1);
    }
}

fn encode_main_pass(
    renderer: &RendererData,
    encoder: &mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    plan: &MainPassPlan,
    scene: &SceneData,
) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Main Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &renderer.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    });

    pass.set_viewport(
        0.0,
        0.0,
        plan.viewport.width() as f32,
        plan.viewport.height() as f32,
        0.0,
        1.0,
    );
    pass.set_bind_group(0, &renderer.main_frame_bind_group, &[]);

    for &index in &plan.draws {
        let (Some(object), Some(binding)) = (scene.objects.get(index), renderer.objects.get(index))
        else {
            log::warn!("[Renderer] Draw {} has no GPU binding", index);
            continue;
        };

        match object.material {
            Material::Phong { .. } => pass.set_pipeline(&renderer.pipelines.phong),
            Material::Lamp => pass.set_pipeline(&renderer.pipelines.lamp),
            Material::Window => {
                let Some(texture) = renderer.window_texture.as_ref() else {
                    continue;
                };
                pass.set_pipeline(&renderer.pipelines.window);
                pass.set_bind_group(2, &texture.bind_group, &[]);
            }
        }

        let mesh = renderer.meshes.get(object.mesh);
        pass.set_bind_group(1, &binding.bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.draw(0..mesh.vertex_count, 0..1);
    }
}

fn encode_frame(
    renderer: &RendererData,
    shadow: &mut ShadowPassData,
    camera: &CameraData,
    config: &DemoConfig,
    scene: &SceneData,
    target: &wgpu::TextureView,
) -> EngineResult<()> {
    let light = begin_depth_pass(shadow, &config.light)?;
    let plan = plan_frame(
        camera,
        renderer.viewport,
        &config.projection,
        light,
        &config.light,
        scene,
    );

    let uniform = build_frame_uniform(&FrameUniformInput {
        view: plan.main.view,
        projection: plan.main.projection,
        light: &plan.depth.light,
        light_config: &config.light,
        camera_position: plan.main.camera_position,
        shadows_enabled: plan.main.shadows_enabled,
    });
    renderer
        .queue
        .write_buffer(&renderer.frame_buffer, 0, bytemuck::bytes_of(&uniform));

    let mut encoder = renderer
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

    encode_depth_pass(renderer, &mut encoder, &plan.depth, scene);

    let main_light = begin_main_pass(shadow)?;
    debug_assert_eq!(main_light, plan.main.light);

    encode_main_pass(renderer, &mut encoder, target, &plan.main, scene);

    renderer.queue.submit(std::iter::once(encoder.finish()));
    Ok(())
}

/// Render one frame. A lost or outdated surface is reconfigured and the
/// frame skipped; any other failure aborts the frame and is returned.
pub fn render_frame(
    renderer: &mut RendererData,
    shadow: &mut ShadowPassData,
    camera: &CameraData,
    config: &DemoConfig,
    scene: &SceneData,
) -> EngineResult<()> {
    let frame = match renderer.surface.get_current_texture() {
        Ok(frame) => frame,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            log::warn!("[Renderer] Surface lost or outdated, reconfiguring");
            renderer.surface.configure(&renderer.device, &renderer.surface_config);
            return Ok(());
        }
        Err(wgpu::SurfaceError::Timeout) => {
            log::warn!("[Renderer] Surface timeout, skipping frame");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    match encode_frame(renderer, shadow, camera, config, scene, &view) {
        Ok(()) => {
            frame.present();
            end_frame(shadow)
        }
        Err(e) => {
            abort_frame(shadow);
            Err(e)
        }
    }
}
