//! Light operations - Pure DOP functions
//!
//! The light view is a fixed look-at from the light toward its target. Given
//! the same config these functions return the same bits every call; nothing
//! here reads time or any other frame-varying input.

use super::light_data::{LightConfig, LightProjection, LightSpaceTransform};
use cgmath::{Deg, Matrix4, Point3, Vector3};

/// Look-at view from the light position toward the target
pub fn build_light_view(light: &LightConfig) -> Matrix4<f32> {
    Matrix4::look_at_rh(
        Point3::from(light.position),
        Point3::from(light.target),
        Vector3::from(light.up),
    )
}

/// Square frustum covering the shadow-casting region
pub fn build_light_projection(light: &LightConfig) -> Matrix4<f32> {
    match light.projection {
        LightProjection::Orthographic { half_extent } => cgmath::ortho(
            -half_extent,
            half_extent,
            -half_extent,
            half_extent,
            light.near,
            light.far,
        ),
        LightProjection::Perspective { fov_degrees } => {
            // Shadow map is square, so aspect is fixed at 1
            cgmath::perspective(Deg(fov_degrees), 1.0, light.near, light.far)
        }
    }
}

/// Compute the frame's light-space transform
pub fn compute_light_space(light: &LightConfig) -> LightSpaceTransform {
    let view = build_light_view(light);
    let projection = build_light_projection(light);
    LightSpaceTransform {
        view,
        projection,
        light_space: projection * view,
    }
}

/// Point in light clip space, after perspective divide.
///
/// Inside the shadow map iff every component is within [-1, 1].
pub fn project_to_light_ndc(transform: &LightSpaceTransform, point: Point3<f32>) -> Vector3<f32> {
    let clip = transform.light_space * point.to_homogeneous();
    Vector3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
}

/// Is the point inside the light frustum (and so able to cast a shadow)?
pub fn light_frustum_covers(transform: &LightSpaceTransform, point: Point3<f32>) -> bool {
    let ndc = project_to_light_ndc(transform, point);
    ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && ndc.z.abs() <= 1.0
}
