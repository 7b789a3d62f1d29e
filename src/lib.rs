//! Illumination - shadow-mapped scene demo
//!
//! Data-Oriented layout: each module keeps plain data in `*_data.rs` and pure
//! transformations in `*_operations.rs`. GPU state is confined to `renderer`.
//!
//! - camera: fly camera and projection policy
//! - lighting: light-space transform and the two-pass frame controller
//! - physics: axis-aligned bounds and containment
//! - scene: the static demo scene
//! - input: event accumulation between frames
//! - renderer: wgpu depth pass and main pass

pub mod app;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod lighting;
pub mod physics;
pub mod renderer;
pub mod scene;

pub use app::{AppContext, Engine};
pub use camera::{CameraData, ProjectionMode, Viewport};
pub use config::{ConfigError, DemoConfig};
pub use error::{EngineError, EngineResult, OptionExt};
pub use lighting::{FramePhase, LightConfig, LightSpaceTransform, ShadowPassData};
pub use physics::AABB;
pub use scene::{SceneData, StageConfig};
