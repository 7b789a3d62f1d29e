//! Renderer Module - wgpu shadow-mapped scene renderer
//!
//! Pure planning (frame_plan, uniforms, mesh) is kept apart from the code
//! that owns GPU resources (renderer_data, renderer_operations).

pub mod frame_plan;
pub mod mesh;
pub mod pipelines;
pub mod renderer_data;
pub mod renderer_operations;
pub mod shadow_map;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use frame_plan::{plan_frame, DepthPassPlan, FramePlan, MainPassPlan};
pub use mesh::{cube_vertices, quad_vertices, GpuMesh, MeshLibrary};
pub use renderer_data::{ObjectBinding, RendererData, TextureBinding};
pub use renderer_operations::{init_renderer, render_frame, resize_renderer};
pub use shadow_map::{check_shadow_map_resolution, ShadowMap};
pub use texture::{procedural_window_image, resolve_window_image, GpuTexture};
pub use uniforms::{
    build_frame_uniform, build_object_uniform, FrameUniform, FrameUniformInput, ObjectUniform,
    OPENGL_TO_WGPU_MATRIX,
};
pub use vertex::Vertex;
