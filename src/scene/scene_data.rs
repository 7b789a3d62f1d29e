//! Scene data structures - Pure DOP
//!
//! The scene is static: built once at startup from the stage config and
//! never edited afterwards.

use cgmath::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// Which static mesh an object draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit cube centred on the origin
    Cube,
    /// Unit quad in the XY plane facing +Z
    Quad,
}

/// How an object is shaded in the main pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Phong lighting with shadow lookup
    Phong { color: [f32; 3] },
    /// Unlit, drawn in the light colour
    Lamp,
    /// Textured, alpha blended
    Window,
}

/// Optional pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub enable_shadows: bool,
    pub enable_window_quad: bool,
    pub enable_lamp: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            enable_shadows: true,
            enable_window_quad: true,
            enable_lamp: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub material: Material,
    pub model: Matrix4<f32>,
    /// World-space centre, used for blend sorting
    pub center: Point3<f32>,
    pub casts_shadow: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneData {
    pub objects: Vec<SceneObject>,
    pub stages: StageConfig,
}
