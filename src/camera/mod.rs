/// Camera Module - Data-Oriented Programming (DOP) style
///
/// - camera_data.rs: Pure data structures with NO methods
/// - camera_operations.rs: Pure functions that operate on data
/// - projection.rs: Projection policy and the viewport it is built for

pub mod camera_data;
pub mod camera_operations;
pub mod projection;

// Re-export data structures
pub use camera_data::{CameraConfig, CameraData, CameraMovement, ProjectionMode};

// Re-export all operations
pub use camera_operations::{
    // Initialization
    init_camera,
    init_camera_from_config,

    // View matrix
    build_view_matrix,

    // Input
    apply_look_delta,
    apply_movement,
    apply_zoom_delta,
    toggle_projection_mode,

    // Utilities
    calculate_basis,
    calculate_front_vector,
    field_of_view,
    position_vector,

    // Diagnostics
    log_camera_context,
};

pub use projection::{build_projection, ProjectionConfig, Viewport};
