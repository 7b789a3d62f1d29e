//! Camera operations - Pure DOP functions
//!
//! All functions are pure: they take data, return new data, no side effects.
//! None of them fail; out-of-range input is clamped.

use super::camera_data::{CameraConfig, CameraData, CameraMovement, ProjectionMode};
use crate::constants::camera as limits;
use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize camera with the default zoom, speed and sensitivity
pub fn init_camera(
    position: Point3<f32>,
    world_up: Vector3<f32>,
    mode: ProjectionMode,
    pitch_degrees: f32,
    yaw_degrees: f32,
) -> CameraData {
    let pitch_degrees = pitch_degrees.clamp(-limits::PITCH_LIMIT, limits::PITCH_LIMIT);
    let (front, right, up) = calculate_basis(yaw_degrees, pitch_degrees, world_up);

    CameraData {
        position,
        front,
        right,
        up,
        world_up,
        yaw_degrees,
        pitch_degrees,
        zoom_degrees: limits::DEFAULT_ZOOM,
        movement_speed: limits::DEFAULT_SPEED,
        sensitivity: limits::DEFAULT_SENSITIVITY,
        projection_mode: mode,
    }
}

/// Initialize camera from config
pub fn init_camera_from_config(config: &CameraConfig) -> CameraData {
    let mut camera = init_camera(
        Point3::from(config.position),
        Vector3::from(config.world_up),
        config.projection_mode,
        config.pitch_degrees,
        config.yaw_degrees,
    );
    camera.zoom_degrees = config.zoom_degrees.clamp(limits::MIN_ZOOM, limits::MAX_ZOOM);
    camera.movement_speed = config.movement_speed;
    camera.sensitivity = config.sensitivity;
    camera
}

// ============================================================================
// VIEW MATRIX
// ============================================================================

/// Right-handed look-at from `position` toward `position + front`
pub fn build_view_matrix(camera: &CameraData) -> Matrix4<f32> {
    Matrix4::look_at_rh(camera.position, camera.position + camera.front, camera.up)
}

// ============================================================================
// INPUT
// ============================================================================

/// Translate along one basis vector by `speed * elapsed_seconds`.
///
/// Only the position changes; the basis is left as is.
pub fn apply_movement(
    camera: &CameraData,
    direction: CameraMovement,
    elapsed_seconds: f32,
) -> CameraData {
    let distance = camera.movement_speed * elapsed_seconds;
    let offset = match direction {
        CameraMovement::Forward => camera.front * distance,
        CameraMovement::Backward => -camera.front * distance,
        CameraMovement::Left => -camera.right * distance,
        CameraMovement::Right => camera.right * distance,
        CameraMovement::Up => camera.up * distance,
        CameraMovement::Down => -camera.up * distance,
    };

    let mut new_camera = *camera;
    new_camera.position += offset;
    new_camera
}

/// Rotate by cursor deltas, clamp pitch, then re-derive the basis
pub fn apply_look_delta(camera: &CameraData, dx: f32, dy: f32) -> CameraData {
    let mut new_camera = *camera;
    new_camera.yaw_degrees += dx * camera.sensitivity;
    new_camera.pitch_degrees = (camera.pitch_degrees + dy * camera.sensitivity)
        .clamp(-limits::PITCH_LIMIT, limits::PITCH_LIMIT);

    let (front, right, up) = calculate_basis(
        new_camera.yaw_degrees,
        new_camera.pitch_degrees,
        new_camera.world_up,
    );
    new_camera.front = front;
    new_camera.right = right;
    new_camera.up = up;
    new_camera
}

/// Narrow or widen the field of view. No-op in orthographic mode.
pub fn apply_zoom_delta(camera: &CameraData, dy: f32) -> CameraData {
    if camera.projection_mode == ProjectionMode::Orthographic {
        return *camera;
    }

    let mut new_camera = *camera;
    new_camera.zoom_degrees = (camera.zoom_degrees - dy).clamp(limits::MIN_ZOOM, limits::MAX_ZOOM);
    new_camera
}

/// Switch between perspective and orthographic projection
pub fn toggle_projection_mode(camera: &CameraData) -> CameraData {
    let mut new_camera = *camera;
    new_camera.projection_mode = match camera.projection_mode {
        ProjectionMode::Perspective => ProjectionMode::Orthographic,
        ProjectionMode::Orthographic => ProjectionMode::Perspective,
    };
    new_camera
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Derive the orthonormal right-handed basis from yaw/pitch (degrees).
///
/// Order matters: front, then right from front and world up, then up from
/// right and front. Any other order loses orthogonality near the pitch clamp.
pub fn calculate_basis(
    yaw_degrees: f32,
    pitch_degrees: f32,
    world_up: Vector3<f32>,
) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let front = calculate_front_vector(yaw_degrees, pitch_degrees);
    let right = front.cross(world_up).normalize();
    let up = right.cross(front).normalize();
    (front, right, up)
}

/// Look direction from yaw and pitch in degrees
pub fn calculate_front_vector(yaw_degrees: f32, pitch_degrees: f32) -> Vector3<f32> {
    let yaw = yaw_degrees.to_radians();
    let pitch = pitch_degrees.to_radians();
    Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

/// Field of view as an angle, for the projection policy
pub fn field_of_view(camera: &CameraData) -> Deg<f32> {
    Deg(camera.zoom_degrees)
}

/// Camera position as a vector (shader upload)
pub fn position_vector(camera: &CameraData) -> Vector3<f32> {
    camera.position.to_vec()
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Log camera context for debugging
pub fn log_camera_context(camera: &CameraData) {
    log::debug!(
        "[Camera] Position: ({:.2}, {:.2}, {:.2}) | Yaw: {:.1}° | Pitch: {:.1}° | FOV: {:.1}° | {:?}",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.yaw_degrees,
        camera.pitch_degrees,
        camera.zoom_degrees,
        camera.projection_mode
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f32 = 1e-5;

    fn origin_camera() -> CameraData {
        init_camera(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
            ProjectionMode::Perspective,
            0.0,
            -90.0,
        )
    }

    fn assert_orthonormal(camera: &CameraData) {
        assert_abs_diff_eq!(camera.front.magnitude(), 1.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.right.magnitude(), 1.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.up.magnitude(), 1.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.front.dot(camera.right), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.front.dot(camera.up), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.right.dot(camera.up), 0.0, epsilon = EPS);
    }

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = origin_camera();
        assert_abs_diff_eq!(camera.front, Vector3::new(0.0, 0.0, -1.0), epsilon = EPS);
        assert_abs_diff_eq!(camera.right, Vector3::new(1.0, 0.0, 0.0), epsilon = EPS);
        assert_abs_diff_eq!(camera.up, Vector3::new(0.0, 1.0, 0.0), epsilon = EPS);
    }

    #[test]
    fn test_basis_is_orthonormal_across_yaw_pitch_grid() {
        let mut pitch = -89.0_f32;
        while pitch <= 89.0 {
            let mut yaw = -360.0_f32;
            while yaw <= 360.0 {
                let mut camera = origin_camera();
                let (front, right, up) = calculate_basis(yaw, pitch, camera.world_up);
                camera.front = front;
                camera.right = right;
                camera.up = up;
                assert_orthonormal(&camera);
                yaw += 17.5;
            }
            pitch += 4.45;
        }
    }

    #[test]
    fn test_basis_is_right_handed() {
        let camera = apply_look_delta(&origin_camera(), 123.0, 77.0);
        let cross = camera.right.cross(camera.up);
        // right × up points backwards out of the screen
        assert_abs_diff_eq!(cross, -camera.front, epsilon = EPS);
    }

    #[test]
    fn test_pitch_clamped_under_large_cumulative_input() {
        let mut camera = origin_camera();
        for _ in 0..1000 {
            camera = apply_look_delta(&camera, 3.0, 50.0);
            assert!(camera.pitch_degrees <= 89.0);
        }
        assert_eq!(camera.pitch_degrees, 89.0);
        assert_orthonormal(&camera);

        for _ in 0..1000 {
            camera = apply_look_delta(&camera, -3.0, -50.0);
            assert!(camera.pitch_degrees >= -89.0);
        }
        assert_eq!(camera.pitch_degrees, -89.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_look_delta_scales_by_sensitivity() {
        let camera = apply_look_delta(&origin_camera(), 10.0, 5.0);
        assert_abs_diff_eq!(camera.yaw_degrees, -90.0 + 10.0 * 0.2, epsilon = EPS);
        assert_abs_diff_eq!(camera.pitch_degrees, 5.0 * 0.2, epsilon = EPS);
    }

    #[test]
    fn test_zoom_clamped_in_perspective() {
        let mut camera = origin_camera();
        for _ in 0..200 {
            camera = apply_zoom_delta(&camera, 3.7);
            assert!(camera.zoom_degrees >= 1.0 && camera.zoom_degrees <= 45.0);
        }
        assert_eq!(camera.zoom_degrees, 1.0);

        for _ in 0..200 {
            camera = apply_zoom_delta(&camera, -2.2);
            assert!(camera.zoom_degrees >= 1.0 && camera.zoom_degrees <= 45.0);
        }
        assert_eq!(camera.zoom_degrees, 45.0);
    }

    #[test]
    fn test_zoom_ignored_in_orthographic() {
        let mut camera = toggle_projection_mode(&origin_camera());
        assert_eq!(camera.projection_mode, ProjectionMode::Orthographic);
        let before = camera.zoom_degrees;
        for delta in [1.0, -5.0, 30.0, -100.0, 0.5] {
            camera = apply_zoom_delta(&camera, delta);
        }
        assert_eq!(camera.zoom_degrees, before);
    }

    #[test]
    fn test_forward_movement_scales_by_speed() {
        let camera = apply_look_delta(&origin_camera(), 40.0, 12.0);
        let moved = apply_movement(&camera, CameraMovement::Forward, 1.0);
        assert_eq!(camera.movement_speed, 2.5);
        assert_abs_diff_eq!(
            moved.position - camera.position,
            camera.front * 2.5,
            epsilon = EPS
        );
    }

    #[test]
    fn test_movement_leaves_basis_untouched() {
        let camera = apply_look_delta(&origin_camera(), 40.0, 12.0);
        for direction in CameraMovement::ALL {
            let moved = apply_movement(&camera, direction, 0.3);
            assert_eq!(moved.front, camera.front);
            assert_eq!(moved.right, camera.right);
            assert_eq!(moved.up, camera.up);
            assert_eq!(moved.yaw_degrees, camera.yaw_degrees);
        }
    }

    #[test]
    fn test_opposite_movements_cancel() {
        let camera = origin_camera();
        let pairs = [
            (CameraMovement::Forward, CameraMovement::Backward),
            (CameraMovement::Left, CameraMovement::Right),
            (CameraMovement::Up, CameraMovement::Down),
        ];
        for (a, b) in pairs {
            let moved = apply_movement(&apply_movement(&camera, a, 0.5), b, 0.5);
            assert_abs_diff_eq!(moved.position, camera.position, epsilon = EPS);
        }
    }

    #[test]
    fn test_view_matrix_maps_front_point_onto_negative_z() {
        let camera = apply_look_delta(&origin_camera(), 25.0, -10.0);
        let view = build_view_matrix(&camera);
        let ahead = camera.position + camera.front * 3.0;
        let in_view = view * ahead.to_homogeneous();
        assert_abs_diff_eq!(in_view.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(in_view.y, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(in_view.z, -3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_init_clamps_pitch_and_zoom_from_config() {
        let config = CameraConfig {
            pitch_degrees: 120.0,
            zoom_degrees: 90.0,
            ..Default::default()
        };
        let camera = init_camera_from_config(&config);
        assert_eq!(camera.pitch_degrees, 89.0);
        assert_eq!(camera.zoom_degrees, 45.0);
        assert_orthonormal(&camera);
    }
}
