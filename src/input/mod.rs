//! Input Module - window events to camera updates at the frame boundary

pub mod input_data;
pub mod input_operations;

pub use input_data::{FrameActions, InputState};
pub use input_operations::{
    drain_into_camera, handle_cursor_moved, handle_key, handle_mouse_button, handle_scroll,
    handle_window_event, movement_for_key,
};
