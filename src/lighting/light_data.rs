//! Light data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in light_operations.rs

use crate::constants::light as defaults;
use cgmath::Matrix4;
use serde::{Deserialize, Serialize};

/// Frustum the shadow-casting light renders its depth pass through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightProjection {
    /// Square box of side `2 * half_extent` around the light axis
    Orthographic { half_extent: f32 },
    /// Square frustum. The angle must cover every caster or peripheral
    /// casters are clipped out of the depth pass and render unshadowed.
    Perspective { fov_degrees: f32 },
}

/// Fixed parameters of the single shadow-casting light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub near: f32,
    pub far: f32,
    pub projection: LightProjection,
    /// Side length of the square shadow map in texels
    pub shadow_map_resolution: u32,
    pub color: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: defaults::POSITION,
            target: defaults::TARGET,
            up: defaults::UP,
            near: defaults::NEAR_PLANE,
            far: defaults::FAR_PLANE,
            projection: LightProjection::Orthographic {
                half_extent: defaults::ORTHO_HALF_EXTENT,
            },
            shadow_map_resolution: defaults::SHADOW_MAP_RESOLUTION,
            color: defaults::COLOR,
        }
    }
}

/// Light-space transform for one frame.
///
/// Computed once per frame and copied by value into the depth pass and the
/// main pass, so both see the same bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpaceTransform {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    /// `projection * view`
    pub light_space: Matrix4<f32>,
}
