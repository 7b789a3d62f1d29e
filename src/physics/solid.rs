/// Bounded solids - cube-like shapes with a cached AABB
///
/// A solid is either a movable object or the scene volume that contains
/// the movable objects. Collision means different things for the two:
/// - against another movable object: the boxes overlap
/// - against a scene volume: the object is no longer fully inside it

use super::aabb::{aabb_contains, aabb_from_center_half_extents, aabb_intersects, AABB};
use cgmath::{Point3, Vector3};

/// Role of a solid in collision tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidKind {
    MovableObject,
    /// Acts as a container, not an obstacle
    SceneVolume,
}

/// Axis-aligned box-shaped solid. The AABB is computed once at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedSolid {
    pub kind: SolidKind,
    pub center: Point3<f32>,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub aabb: AABB,
}

/// Create a solid from its center and full dimensions
pub fn create_solid(
    kind: SolidKind,
    center: Point3<f32>,
    width: f32,
    height: f32,
    depth: f32,
) -> BoundedSolid {
    let half = Vector3::new(width * 0.5, height * 0.5, depth * 0.5);
    BoundedSolid {
        kind,
        center,
        width,
        height,
        depth,
        aabb: aabb_from_center_half_extents(center, half),
    }
}

/// Does `solid` collide with `other`?
///
/// The rule is decided by the kind of `other`. A scene volume is inverted:
/// collision is "not contained", not "overlapping".
pub fn solid_collides_with(solid: &BoundedSolid, other: &BoundedSolid) -> bool {
    match other.kind {
        SolidKind::MovableObject => aabb_intersects(&solid.aabb, &other.aabb),
        SolidKind::SceneVolume => !aabb_contains(&other.aabb, &solid.aabb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_volume() -> BoundedSolid {
        create_solid(SolidKind::SceneVolume, Point3::new(0.0, 0.0, 0.0), 10.0, 10.0, 10.0)
    }

    fn object_at(x: f32, y: f32, z: f32) -> BoundedSolid {
        create_solid(SolidKind::MovableObject, Point3::new(x, y, z), 2.0, 2.0, 2.0)
    }

    #[test]
    fn test_contained_object_does_not_collide_with_scene_volume() {
        assert!(!solid_collides_with(&object_at(0.0, 0.0, 0.0), &scene_volume()));
    }

    #[test]
    fn test_escaped_object_collides_with_scene_volume() {
        assert!(solid_collides_with(&object_at(10.0, 0.0, 0.0), &scene_volume()));
    }

    #[test]
    fn test_partially_outside_counts_as_collision() {
        // Straddles the +x wall: overlaps the volume but is not contained
        let straddling = object_at(4.5, 0.0, 0.0);
        assert!(aabb_intersects(&straddling.aabb, &scene_volume().aabb));
        assert!(solid_collides_with(&straddling, &scene_volume()));
    }

    #[test]
    fn test_object_flush_with_wall_is_contained() {
        assert!(!solid_collides_with(&object_at(4.0, 4.0, -4.0), &scene_volume()));
    }

    #[test]
    fn test_movable_objects_collide_on_overlap() {
        let a = object_at(0.0, 0.0, 0.0);
        let b = object_at(1.5, 0.0, 0.0);
        let c = object_at(3.0, 3.0, 0.0);
        assert!(solid_collides_with(&a, &b));
        assert!(solid_collides_with(&b, &a));
        assert!(!solid_collides_with(&a, &c));
    }

    #[test]
    fn test_scene_volume_rule_differs_from_overlap() {
        // Fully inside: overlap says yes, the container rule says no
        let inside = object_at(0.0, 0.0, 0.0);
        let volume = scene_volume();
        assert!(aabb_intersects(&inside.aabb, &volume.aabb));
        assert!(!solid_collides_with(&inside, &volume));
    }

    #[test]
    fn test_aabb_matches_dimensions() {
        let solid = create_solid(
            SolidKind::MovableObject,
            Point3::new(1.0, 2.0, 3.0),
            4.0,
            2.0,
            6.0,
        );
        assert_eq!(solid.aabb.min, Point3::new(-1.0, 1.0, 0.0));
        assert_eq!(solid.aabb.max, Point3::new(3.0, 3.0, 6.0));
    }
}
