//! GPU uniform blocks
//!
//! Layouts mirror the WGSL structs byte for byte. vec3 values are padded to
//! vec4 so the host side never has to reason about std140 alignment.

use crate::lighting::{LightConfig, LightSpaceTransform};
use crate::scene::{Material, SceneObject};
use cgmath::{Matrix, Matrix4, Point3, SquareMatrix};

/// cgmath builds OpenGL clip space (z in [-1, 1]); wgpu expects z in [0, 1]
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Per-frame values shared by the depth pass and the main pass
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_space: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    pub shadows_enabled: u32,
    /// 1 / shadow map resolution, the PCF kernel step
    pub texel_size: f32,
    pub _padding: [u32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<FrameUniform>(), 256);

/// Per-object values
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<ObjectUniform>(), 144);

/// Inputs to one frame's shared uniform
#[derive(Debug, Clone, Copy)]
pub struct FrameUniformInput<'a> {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub light: &'a LightSpaceTransform,
    pub light_config: &'a LightConfig,
    pub camera_position: Point3<f32>,
    pub shadows_enabled: bool,
}

fn extend(v: [f32; 3], w: f32) -> [f32; 4] {
    [v[0], v[1], v[2], w]
}

pub fn build_frame_uniform(input: &FrameUniformInput) -> FrameUniform {
    let resolution = input.light_config.shadow_map_resolution.max(1) as f32;
    FrameUniform {
        view: input.view.into(),
        projection: (OPENGL_TO_WGPU_MATRIX * input.projection).into(),
        light_space: (OPENGL_TO_WGPU_MATRIX * input.light.light_space).into(),
        camera_position: extend(input.camera_position.into(), 1.0),
        light_position: extend(input.light_config.position, 1.0),
        light_color: extend(input.light_config.color, 1.0),
        shadows_enabled: u32::from(input.shadows_enabled),
        texel_size: 1.0 / resolution,
        _padding: [0; 2],
    }
}

pub fn build_object_uniform(object: &SceneObject, light: &LightConfig) -> ObjectUniform {
    let normal_matrix = object
        .model
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(|| {
            log::warn!(
                "[Uniforms] Model matrix of '{}' is singular, using identity normals",
                object.name
            );
            Matrix4::identity()
        });

    let color = match object.material {
        Material::Phong { color } => extend(color, 1.0),
        Material::Lamp => extend(light.color, 1.0),
        Material::Window => [1.0, 1.0, 1.0, 1.0],
    };

    ObjectUniform {
        model: object.model.into(),
        normal_matrix: normal_matrix.into(),
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::compute_light_space;
    use crate::scene::{build_demo_scene, StageConfig};
    use approx::assert_abs_diff_eq;
    use cgmath::{Vector4, Zero};

    #[test]
    fn test_depth_correction_maps_gl_range_to_wgpu_range() {
        let near = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_abs_diff_eq!(near.z, 0.0);
        assert_abs_diff_eq!(far.z, 1.0);
    }

    #[test]
    fn test_frame_uniform_carries_light_and_texel_size() {
        let light_config = LightConfig::default();
        let light = compute_light_space(&light_config);
        let uniform = build_frame_uniform(&FrameUniformInput {
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            light: &light,
            light_config: &light_config,
            camera_position: Point3::new(0.0, 1.0, 5.0),
            shadows_enabled: true,
        });

        let expected: [[f32; 4]; 4] = (OPENGL_TO_WGPU_MATRIX * light.light_space).into();
        assert_eq!(uniform.light_space, expected);
        assert_eq!(uniform.shadows_enabled, 1);
        assert_abs_diff_eq!(uniform.texel_size, 1.0 / 1024.0);
        assert_eq!(uniform.camera_position, [0.0, 1.0, 5.0, 1.0]);
        assert_eq!(uniform.light_position, [-2.0, 4.0, -1.0, 1.0]);
    }

    #[test]
    fn test_object_uniform_normal_matrix_for_uniform_scale() {
        let scene = build_demo_scene(StageConfig::default(), &LightConfig::default());
        let cube = scene
            .objects
            .iter()
            .find(|o| o.name == "cube")
            .expect("scene has a cube");
        let uniform = build_object_uniform(cube, &LightConfig::default());
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        assert_eq!(uniform.normal_matrix, identity);
        assert_eq!(uniform.color, [1.0, 0.5, 0.31, 1.0]);
    }

    #[test]
    fn test_singular_model_falls_back_to_identity_normals() {
        let scene = build_demo_scene(StageConfig::default(), &LightConfig::default());
        let mut flat = scene.objects[0].clone();
        flat.model = Matrix4::zero();
        let uniform = build_object_uniform(&flat, &LightConfig::default());
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        assert_eq!(uniform.normal_matrix, identity);
    }

    #[test]
    fn test_lamp_uses_light_color() {
        let mut light = LightConfig::default();
        light.color = [0.2, 0.4, 0.6];
        let scene = build_demo_scene(StageConfig::default(), &light);
        let lamp = scene
            .objects
            .iter()
            .find(|o| o.material == Material::Lamp)
            .expect("scene has a lamp");
        assert_eq!(build_object_uniform(lamp, &light).color, [0.2, 0.4, 0.6, 1.0]);
    }
}
