//! Camera data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in camera_operations.rs

use crate::constants::camera as defaults;
use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// How the camera maps view space to clip space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// Discrete movement directions driven by held keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl CameraMovement {
    /// Fixed order in which held directions are applied each frame
    pub const ALL: [CameraMovement; 6] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
        CameraMovement::Up,
        CameraMovement::Down,
    ];
}

/// Camera data structure - pure data, no methods
///
/// `front`, `right` and `up` are always derived from `yaw_degrees`,
/// `pitch_degrees` and `world_up`; nothing writes them directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    /// Camera position in world space
    pub position: Point3<f32>,

    /// Unit look direction
    pub front: Vector3<f32>,

    /// Unit right vector, `front × world_up`
    pub right: Vector3<f32>,

    /// Unit camera up, `right × front`
    pub up: Vector3<f32>,

    /// Fixed reference the basis is derived against
    pub world_up: Vector3<f32>,

    /// Yaw rotation (degrees, around the vertical axis)
    pub yaw_degrees: f32,

    /// Pitch rotation (degrees, clamped to [-89, 89])
    pub pitch_degrees: f32,

    /// Vertical field of view (degrees, clamped to [1, 45])
    pub zoom_degrees: f32,

    /// Movement speed (world units per second)
    pub movement_speed: f32,

    /// Look sensitivity (degrees per cursor pixel)
    pub sensitivity: f32,

    pub projection_mode: ProjectionMode,
}

/// Camera configuration for initialization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub world_up: [f32; 3],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub zoom_degrees: f32,
    pub movement_speed: f32,
    pub sensitivity: f32,
    pub projection_mode: ProjectionMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.0, 5.0],
            world_up: defaults::WORLD_UP,
            yaw_degrees: defaults::DEFAULT_YAW,
            pitch_degrees: defaults::DEFAULT_PITCH,
            zoom_degrees: defaults::DEFAULT_ZOOM,
            movement_speed: defaults::DEFAULT_SPEED,
            sensitivity: defaults::DEFAULT_SENSITIVITY,
            projection_mode: ProjectionMode::Perspective,
        }
    }
}
