//! Physics Module - bounding volumes and simple solids

pub mod aabb;
pub mod solid;

pub use aabb::{
    aabb_center, aabb_contains, aabb_contains_point, aabb_from_center_half_extents,
    aabb_half_extents, aabb_intersects, aabb_translated, aabb_union, create_aabb, AABB,
};
pub use solid::{create_solid, solid_collides_with, BoundedSolid, SolidKind};
