//! Scene operations - Pure DOP functions

use super::scene_data::{Material, MeshKind, SceneData, SceneObject, StageConfig};
use crate::lighting::{light_frustum_covers, LightConfig, LightSpaceTransform};
use crate::physics::{
    create_aabb, create_solid, solid_collides_with, BoundedSolid, SolidKind, AABB,
};
use cgmath::{Deg, InnerSpace, Matrix4, Point3, Transform, Vector3};

/// Object colour of the lit cubes
pub const OBJECT_COLOR: [f32; 3] = [1.0, 0.5, 0.31];
const FLOOR_COLOR: [f32; 3] = [0.55, 0.55, 0.6];
const LAMP_SCALE: f32 = 0.2;

fn object(
    name: &'static str,
    mesh: MeshKind,
    material: Material,
    model: Matrix4<f32>,
    casts_shadow: bool,
) -> SceneObject {
    SceneObject {
        name,
        mesh,
        material,
        model,
        center: model.transform_point(Point3::new(0.0, 0.0, 0.0)),
        casts_shadow,
    }
}

/// Build the demo scene for the enabled stages
pub fn build_demo_scene(stages: StageConfig, light: &LightConfig) -> SceneData {
    let mut objects = vec![
        object(
            "floor",
            MeshKind::Cube,
            Material::Phong { color: FLOOR_COLOR },
            Matrix4::from_translation(Vector3::new(0.0, -0.6, 0.0))
                * Matrix4::from_nonuniform_scale(10.0, 0.2, 10.0),
            false,
        ),
        object(
            "cube",
            MeshKind::Cube,
            Material::Phong { color: OBJECT_COLOR },
            Matrix4::from_translation(Vector3::new(0.0, 0.0, 0.0)),
            true,
        ),
        object(
            "small cube",
            MeshKind::Cube,
            Material::Phong { color: OBJECT_COLOR },
            Matrix4::from_translation(Vector3::new(2.0, -0.25, 1.0)) * Matrix4::from_scale(0.5),
            true,
        ),
        object(
            "tilted cube",
            MeshKind::Cube,
            Material::Phong { color: OBJECT_COLOR },
            Matrix4::from_translation(Vector3::new(-1.0, 0.5, 2.0))
                * Matrix4::from_axis_angle(Vector3::new(1.0, 0.0, 1.0).normalize(), Deg(60.0))
                * Matrix4::from_scale(0.25),
            true,
        ),
    ];

    if stages.enable_lamp {
        objects.push(object(
            "lamp",
            MeshKind::Cube,
            Material::Lamp,
            Matrix4::from_translation(Vector3::from(light.position))
                * Matrix4::from_scale(LAMP_SCALE),
            false,
        ));
    }

    if stages.enable_window_quad {
        objects.push(object(
            "window",
            MeshKind::Quad,
            Material::Window,
            Matrix4::from_translation(Vector3::new(0.5, 0.0, 1.6)),
            false,
        ));
    }

    log::info!(
        "[Scene] Built {} objects (shadows: {}, window: {}, lamp: {})",
        objects.len(),
        stages.enable_shadows,
        stages.enable_window_quad,
        stages.enable_lamp
    );

    SceneData { objects, stages }
}

/// Volume every object is expected to stay inside
pub fn scene_volume() -> BoundedSolid {
    create_solid(
        SolidKind::SceneVolume,
        Point3::new(0.0, 2.0, 0.0),
        10.0,
        6.0,
        10.0,
    )
}

/// World-space box of an object's unit mesh under its model transform
pub fn object_aabb(object: &SceneObject) -> AABB {
    let half = 0.5;
    let depth = match object.mesh {
        MeshKind::Cube => half,
        MeshKind::Quad => 0.0,
    };
    let mut corners = Vec::with_capacity(8);
    for x in [-half, half] {
        for y in [-half, half] {
            for z in [-depth, depth] {
                corners.push(object.model.transform_point(Point3::new(x, y, z)));
            }
        }
    }

    let mut bounds = create_aabb(corners[0], corners[0]);
    for corner in &corners[1..] {
        bounds = crate::physics::aabb_union(&bounds, &create_aabb(*corner, *corner));
    }
    bounds
}

/// Object as a movable solid, for containment checks
pub fn object_solid(object: &SceneObject) -> BoundedSolid {
    let bounds = object_aabb(object);
    let size = bounds.max - bounds.min;
    create_solid(
        SolidKind::MovableObject,
        crate::physics::aabb_center(&bounds),
        size.x,
        size.y,
        size.z,
    )
}

/// Names of objects that have left the scene volume
pub fn escaped_objects(scene: &SceneData, volume: &BoundedSolid) -> Vec<&'static str> {
    scene
        .objects
        .iter()
        .filter(|o| solid_collides_with(&object_solid(o), volume))
        .map(|o| o.name)
        .collect()
}

/// Indices of objects drawn into the shadow map
pub fn shadow_casters(scene: &SceneData) -> Vec<usize> {
    if !scene.stages.enable_shadows {
        return Vec::new();
    }
    scene
        .objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.casts_shadow)
        .map(|(i, _)| i)
        .collect()
}

/// Names of shadow casters not fully inside the light frustum. Their
/// clipped parts are missing from the shadow map.
pub fn unshadowed_casters(scene: &SceneData, light: &LightSpaceTransform) -> Vec<&'static str> {
    shadow_casters(scene)
        .into_iter()
        .map(|i| &scene.objects[i])
        .filter(|o| {
            let bounds = object_aabb(o);
            let (lo, hi) = (bounds.min, bounds.max);
            let corners = [
                Point3::new(lo.x, lo.y, lo.z),
                Point3::new(hi.x, lo.y, lo.z),
                Point3::new(lo.x, hi.y, lo.z),
                Point3::new(hi.x, hi.y, lo.z),
                Point3::new(lo.x, lo.y, hi.z),
                Point3::new(hi.x, lo.y, hi.z),
                Point3::new(lo.x, hi.y, hi.z),
                Point3::new(hi.x, hi.y, hi.z),
            ];
            !corners.iter().all(|&c| light_frustum_covers(light, c))
        })
        .map(|o| o.name)
        .collect()
}

/// Main pass draw order: opaque objects in scene order, then blended
/// objects back to front from the camera.
pub fn main_pass_draw_order(scene: &SceneData, camera_position: Point3<f32>) -> Vec<usize> {
    let mut opaque = Vec::new();
    let mut blended = Vec::new();
    for (i, o) in scene.objects.iter().enumerate() {
        match o.material {
            Material::Window => blended.push(i),
            Material::Phong { .. } | Material::Lamp => opaque.push(i),
        }
    }

    blended.sort_by(|&a, &b| {
        let da = (scene.objects[a].center - camera_position).magnitude2();
        let db = (scene.objects[b].center - camera_position).magnitude2();
        db.total_cmp(&da)
    });

    opaque.extend(blended);
    opaque
}
