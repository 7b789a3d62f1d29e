//! Frame planning - Pure DOP
//!
//! Everything the GPU passes need for one frame, computed without touching
//! the device. Both plans hold a copy of the same light-space transform.

use crate::camera::{
    build_projection, build_view_matrix, field_of_view, CameraData, ProjectionConfig, Viewport,
};
use crate::lighting::{LightConfig, LightSpaceTransform};
use crate::scene::{main_pass_draw_order, shadow_casters, SceneData};
use cgmath::{Matrix4, Point3};

/// Depth-only render from the light
#[derive(Debug, Clone, PartialEq)]
pub struct DepthPassPlan {
    pub light: LightSpaceTransform,
    /// Shadow map side length; the pass viewport is resolution x resolution
    pub resolution: u32,
    /// Scene object indices drawn into the shadow map
    pub casters: Vec<usize>,
}

/// Lit render from the camera
#[derive(Debug, Clone, PartialEq)]
pub struct MainPassPlan {
    pub viewport: Viewport,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub light: LightSpaceTransform,
    pub camera_position: Point3<f32>,
    pub shadows_enabled: bool,
    /// Scene object indices in draw order
    pub draws: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub depth: DepthPassPlan,
    pub main: MainPassPlan,
}

/// Plan both passes of a frame around one light-space transform
pub fn plan_frame(
    camera: &CameraData,
    viewport: Viewport,
    projection: &ProjectionConfig,
    light: LightSpaceTransform,
    light_config: &LightConfig,
    scene: &SceneData,
) -> FramePlan {
    let depth = DepthPassPlan {
        light,
        resolution: light_config.shadow_map_resolution,
        casters: shadow_casters(scene),
    };

    let main = MainPassPlan {
        viewport,
        view: build_view_matrix(camera),
        projection: build_projection(
            camera.projection_mode,
            viewport,
            field_of_view(camera),
            projection,
        ),
        light,
        camera_position: camera.position,
        shadows_enabled: scene.stages.enable_shadows,
        draws: main_pass_draw_order(scene, camera.position),
    };

    FramePlan { depth, main }
}
