//! Scene Module - the static objects each frame draws
//!
//! - scene_data.rs: objects, materials and stage flags (pure data)
//! - scene_operations.rs: scene construction, bounds and draw ordering

pub mod scene_data;
pub mod scene_operations;

pub use scene_data::{Material, MeshKind, SceneData, SceneObject, StageConfig};
pub use scene_operations::{
    build_demo_scene, escaped_objects, main_pass_draw_order, object_aabb, object_solid,
    scene_volume, shadow_casters, unshadowed_casters, OBJECT_COLOR,
};
