/// Data-Oriented Axis-Aligned Bounding Box System
///
/// Pure functions for overlap and containment - no methods, just data transformations.
/// All tests are inclusive: touching faces count as overlapping and as contained.

use cgmath::{Point3, Vector3};

/// Axis-Aligned Bounding Box - pure data structure
///
/// `min` is less than or equal to `max` on every axis; every constructor
/// in this module keeps that true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

/// Create new AABB from two opposite corners
/// Pure function - orders components so min <= max per axis
pub fn create_aabb(a: Point3<f32>, b: Point3<f32>) -> AABB {
    AABB {
        min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
        max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
    }
}

/// Create AABB from center point and half extents
/// Pure function - negative extents are treated by magnitude
pub fn aabb_from_center_half_extents(center: Point3<f32>, half_extents: Vector3<f32>) -> AABB {
    let h = Vector3::new(
        half_extents.x.abs(),
        half_extents.y.abs(),
        half_extents.z.abs(),
    );
    AABB {
        min: center - h,
        max: center + h,
    }
}

/// Get center point of AABB
pub fn aabb_center(aabb: &AABB) -> Point3<f32> {
    Point3::new(
        (aabb.min.x + aabb.max.x) * 0.5,
        (aabb.min.y + aabb.max.y) * 0.5,
        (aabb.min.z + aabb.max.z) * 0.5,
    )
}

/// Get half extents of AABB
pub fn aabb_half_extents(aabb: &AABB) -> Vector3<f32> {
    (aabb.max - aabb.min) * 0.5
}

/// Test if two AABBs overlap on all three axes (slab test, inclusive)
/// Symmetric in its arguments
pub fn aabb_intersects(aabb1: &AABB, aabb2: &AABB) -> bool {
    aabb1.min.x <= aabb2.max.x && aabb1.max.x >= aabb2.min.x &&
    aabb1.min.y <= aabb2.max.y && aabb1.max.y >= aabb2.min.y &&
    aabb1.min.z <= aabb2.max.z && aabb1.max.z >= aabb2.min.z
}

/// Test if `inner` lies entirely within `outer` (inclusive)
pub fn aabb_contains(outer: &AABB, inner: &AABB) -> bool {
    aabb_contains_point(outer, inner.min) && aabb_contains_point(outer, inner.max)
}

/// Test if AABB contains a point
pub fn aabb_contains_point(aabb: &AABB, point: Point3<f32>) -> bool {
    point.x >= aabb.min.x && point.x <= aabb.max.x &&
    point.y >= aabb.min.y && point.y <= aabb.max.y &&
    point.z >= aabb.min.z && point.z <= aabb.max.z
}

/// Create translated copy of AABB
pub fn aabb_translated(aabb: &AABB, offset: Vector3<f32>) -> AABB {
    AABB {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// Smallest AABB enclosing both inputs
pub fn aabb_union(aabb1: &AABB, aabb2: &AABB) -> AABB {
    AABB {
        min: Point3::new(
            aabb1.min.x.min(aabb2.min.x),
            aabb1.min.y.min(aabb2.min.y),
            aabb1.min.z.min(aabb2.min.z),
        ),
        max: Point3::new(
            aabb1.max.x.max(aabb2.max.x),
            aabb1.max.y.max(aabb2.max.y),
            aabb1.max.z.max(aabb2.max.z),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(center: [f32; 3], half: f32) -> AABB {
        aabb_from_center_half_extents(Point3::from(center), Vector3::new(half, half, half))
    }

    #[test]
    fn test_create_aabb_orders_corners() {
        let aabb = create_aabb(Point3::new(1.0, -2.0, 3.0), Point3::new(-1.0, 2.0, -3.0));
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_negative_half_extents_keep_invariant() {
        let aabb = aabb_from_center_half_extents(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(-1.0, 2.0, -3.0),
        );
        assert!(aabb.min.x <= aabb.max.x && aabb.min.y <= aabb.max.y && aabb.min.z <= aabb.max.z);
        assert_eq!(aabb_half_extents(&aabb), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let boxes = [
            cube([0.0, 0.0, 0.0], 1.0),
            cube([1.5, 0.0, 0.0], 0.5),
            cube([2.0, 2.0, 2.0], 0.9),
            cube([-3.0, 0.5, 0.0], 2.0),
            cube([10.0, 0.0, 0.0], 1.0),
            create_aabb(Point3::new(-5.0, -0.1, -5.0), Point3::new(5.0, 0.1, 5.0)),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(aabb_intersects(a, b), aabb_intersects(b, a));
            }
        }
    }

    #[test]
    fn test_touching_faces_overlap() {
        let a = cube([0.0, 0.0, 0.0], 1.0);
        let b = cube([2.0, 0.0, 0.0], 1.0);
        assert!(aabb_intersects(&a, &b));
        let c = cube([2.001, 0.0, 0.0], 1.0);
        assert!(!aabb_intersects(&a, &c));
    }

    #[test]
    fn test_separated_on_one_axis_does_not_overlap() {
        let a = cube([0.0, 0.0, 0.0], 1.0);
        let b = cube([0.0, 0.0, 5.0], 1.0);
        assert!(!aabb_intersects(&a, &b));
    }

    #[test]
    fn test_containment_is_inclusive() {
        let outer = cube([0.0, 0.0, 0.0], 5.0);
        assert!(aabb_contains(&outer, &cube([0.0, 0.0, 0.0], 1.0)));
        assert!(aabb_contains(&outer, &cube([4.0, 0.0, 0.0], 1.0)));
        assert!(aabb_contains(&outer, &outer));
        assert!(!aabb_contains(&outer, &cube([4.5, 0.0, 0.0], 1.0)));
        assert!(!aabb_contains(&cube([0.0, 0.0, 0.0], 1.0), &outer));
    }

    #[test]
    fn test_translate_and_union() {
        let a = cube([0.0, 0.0, 0.0], 1.0);
        let moved = aabb_translated(&a, Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(aabb_center(&moved), Point3::new(3.0, 0.0, 0.0));
        let both = aabb_union(&a, &moved);
        assert_eq!(both.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(both.max, Point3::new(4.0, 1.0, 1.0));
    }
}
