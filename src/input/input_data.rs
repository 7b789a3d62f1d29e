//! Input data structures - Pure DOP
//!
//! Events are recorded here as they arrive and drained once per frame, so
//! the camera only ever changes at the frame boundary.

use crate::camera::CameraMovement;
use std::collections::HashSet;

/// Input accumulated since the last frame boundary
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Movement keys currently held
    pub held: HashSet<CameraMovement>,

    /// Look button is down
    pub dragging: bool,

    /// Next cursor event only re-anchors `last_cursor`
    pub discard_next_cursor: bool,

    pub last_cursor: Option<(f64, f64)>,

    /// Look deltas (x right, y up) in arrival order
    pub pending_look: Vec<(f32, f32)>,

    /// Zoom deltas in arrival order
    pub pending_zoom: Vec<f32>,

    /// Projection toggles requested since the last frame
    pub pending_toggles: u32,

    pub quit_requested: bool,
}

/// What the frame loop should do besides updating the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameActions {
    pub quit: bool,
    pub projection_toggled: bool,
}
