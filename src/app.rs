//! Application context and frame loop
//!
//! All mutable demo state lives in `AppContext`, owned by the event loop
//! closure. Input handlers only record into it; the camera changes once per
//! frame in `advance_frame`.

use crate::camera::{init_camera_from_config, log_camera_context, CameraData};
use crate::config::DemoConfig;
use crate::error::EngineResult;
use crate::input::{drain_into_camera, handle_window_event, FrameActions, InputState};
use crate::lighting::{compute_light_space, ShadowPassData};
use crate::renderer::{init_renderer, render_frame, resize_renderer};
use crate::scene::{
    build_demo_scene, escaped_objects, scene_volume, unshadowed_casters, SceneData,
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Measures the time between consecutive frames
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    pub last: Option<Instant>,
}

/// Seconds since the previous tick; zero on the first tick
pub fn tick_at(clock: &mut FrameClock, now: Instant) -> f32 {
    let elapsed = clock
        .last
        .map(|last| now.saturating_duration_since(last).as_secs_f32())
        .unwrap_or(0.0);
    clock.last = Some(now);
    elapsed
}

/// Everything the frame loop mutates
pub struct AppContext {
    pub config: DemoConfig,
    pub camera: CameraData,
    pub input: InputState,
    pub shadow: ShadowPassData,
    pub scene: SceneData,
    pub clock: FrameClock,
}

pub fn create_app_context(config: DemoConfig) -> EngineResult<AppContext> {
    config.validate()?;

    let scene = build_demo_scene(config.stages, &config.light);
    let escaped = escaped_objects(&scene, &scene_volume());
    if !escaped.is_empty() {
        log::warn!("[App] Objects outside the scene volume: {:?}", escaped);
    }
    let unshadowed = unshadowed_casters(&scene, &compute_light_space(&config.light));
    if !unshadowed.is_empty() {
        log::warn!("[App] Shadow casters outside the light frustum: {:?}", unshadowed);
    }

    let camera = init_camera_from_config(&config.camera);
    log_camera_context(&camera);

    Ok(AppContext {
        config,
        camera,
        input: InputState::default(),
        shadow: ShadowPassData::default(),
        scene,
        clock: FrameClock::default(),
    })
}

/// Frame boundary: drain pending input into the camera
pub fn advance_frame(context: &mut AppContext, elapsed_seconds: f32) -> FrameActions {
    let (camera, actions) = drain_into_camera(&mut context.input, &context.camera, elapsed_seconds);
    context.camera = camera;
    log_camera_context(&context.camera);
    actions
}

/// Owns the event loop until `run`
pub struct Engine {
    config: DemoConfig,
    event_loop: Option<EventLoop<()>>,
}

impl Engine {
    pub fn new(config: DemoConfig) -> Result<Self> {
        log::debug!("[Engine::new] Creating event loop");
        let event_loop = EventLoop::new()?;
        Ok(Self {
            config,
            event_loop: Some(event_loop),
        })
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow::anyhow!("Event loop already taken"))?;

        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.config.window.title.clone())
                .with_inner_size(PhysicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ))
                .build(&event_loop)?,
        );

        let mut context = create_app_context(self.config)?;
        let mut renderer = init_renderer(window.clone(), &context.config, &context.scene)?;
        log::info!(
            "[Engine::run] Shadow map {}x{}, stages {:?}",
            context.config.light.shadow_map_resolution,
            context.config.light.shadow_map_resolution,
            context.config.stages
        );

        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                if handle_window_event(&mut context.input, &event) {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested => {
                        log::info!("[Engine::run] Close requested");
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => {
                        if resize_renderer(&mut renderer, size.width, size.height) {
                            log::info!("[Engine::run] Resized to {}x{}", size.width, size.height);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let elapsed = tick_at(&mut context.clock, Instant::now());
                        let actions = advance_frame(&mut context, elapsed);
                        if actions.quit {
                            log::info!("[Engine::run] Quit requested");
                            elwt.exit();
                            return;
                        }

                        if let Err(e) = render_frame(
                            &mut renderer,
                            &mut context.shadow,
                            &context.camera,
                            &context.config,
                            &context.scene,
                        ) {
                            log::error!("[Engine::run] Frame failed: {}", e);
                            elwt.exit();
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        })?;

        log::info!("[Engine::run] Event loop finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ProjectionMode;
    use crate::input::handle_key;
    use crate::lighting::{FramePhase, LightProjection};
    use std::time::Duration;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_clock_first_tick_is_zero() {
        let mut clock = FrameClock::default();
        let start = Instant::now();
        assert_eq!(tick_at(&mut clock, start), 0.0);
        let elapsed = tick_at(&mut clock, start + Duration::from_millis(250));
        assert!((elapsed - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut clock = FrameClock::default();
        let start = Instant::now() + Duration::from_secs(1);
        tick_at(&mut clock, start);
        assert_eq!(tick_at(&mut clock, start - Duration::from_millis(10)), 0.0);
    }

    #[test]
    fn test_context_starts_idle_with_configured_camera() {
        let context = create_app_context(DemoConfig::default()).expect("context");
        assert_eq!(context.shadow.phase, FramePhase::Idle);
        assert_eq!(context.camera.projection_mode, ProjectionMode::Perspective);
        assert_eq!(context.scene.objects.len(), 6);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = DemoConfig::default();
        config.projection.near = -1.0;
        assert!(create_app_context(config).is_err());
    }

    #[test]
    fn test_narrow_light_still_starts() {
        let mut config = DemoConfig::default();
        config.light.projection = LightProjection::Perspective { fov_degrees: 5.0 };
        let context = create_app_context(config).expect("context");
        assert!(!unshadowed_casters(
            &context.scene,
            &compute_light_space(&context.config.light)
        )
        .is_empty());
    }

    #[test]
    fn test_camera_only_changes_at_frame_boundary() {
        let mut context = create_app_context(DemoConfig::default()).expect("context");
        let before = context.camera;
        handle_key(&mut context.input, KeyCode::KeyP, true, false);
        assert_eq!(context.camera, before);

        let actions = advance_frame(&mut context, 0.016);
        assert!(actions.projection_toggled);
        assert_eq!(context.camera.projection_mode, ProjectionMode::Orthographic);
    }
}
