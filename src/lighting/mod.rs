//! Lighting Module - single shadow-casting light and its two-pass frame
//!
//! - light_data.rs: light config and per-frame transform (pure data)
//! - light_operations.rs: light view/projection construction
//! - shadow_pass.rs: depth pass / main pass sequencing

pub mod light_data;
pub mod light_operations;
pub mod shadow_pass;

pub use light_data::{LightConfig, LightProjection, LightSpaceTransform};
pub use light_operations::{
    build_light_projection, build_light_view, compute_light_space, light_frustum_covers,
    project_to_light_ndc,
};
pub use shadow_pass::{
    abort_frame, begin_depth_pass, begin_main_pass, end_frame, FramePhase, ShadowPassData,
};
