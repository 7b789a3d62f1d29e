//! Input operations
//!
//! Key bindings: W/S up/down, A/D left/right, ArrowUp/ArrowDown forward/backward,
//! P toggles projection, Escape quits. Look deltas only flow while the left
//! mouse button is held.

use super::input_data::{FrameActions, InputState};
use crate::camera::{
    apply_look_delta, apply_movement, apply_zoom_delta, toggle_projection_mode, CameraData,
    CameraMovement,
};
use crate::constants::render::PIXELS_PER_SCROLL_LINE;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Movement bound to a key, if any
pub fn movement_for_key(code: KeyCode) -> Option<CameraMovement> {
    match code {
        KeyCode::KeyW => Some(CameraMovement::Up),
        KeyCode::KeyS => Some(CameraMovement::Down),
        KeyCode::KeyA => Some(CameraMovement::Left),
        KeyCode::KeyD => Some(CameraMovement::Right),
        KeyCode::ArrowUp => Some(CameraMovement::Forward),
        KeyCode::ArrowDown => Some(CameraMovement::Backward),
        _ => None,
    }
}

pub fn handle_key(state: &mut InputState, code: KeyCode, pressed: bool, repeat: bool) {
    if let Some(movement) = movement_for_key(code) {
        if pressed {
            state.held.insert(movement);
        } else {
            state.held.remove(&movement);
        }
        return;
    }

    if !pressed || repeat {
        return;
    }
    match code {
        KeyCode::Escape => state.quit_requested = true,
        KeyCode::KeyP => state.pending_toggles += 1,
        _ => {}
    }
}

pub fn handle_mouse_button(state: &mut InputState, button: MouseButton, pressed: bool) {
    if button != MouseButton::Left {
        return;
    }
    state.dragging = pressed;
    if pressed {
        state.discard_next_cursor = true;
    }
}

pub fn handle_cursor_moved(state: &mut InputState, x: f64, y: f64) {
    if !state.dragging {
        return;
    }

    if state.discard_next_cursor {
        state.discard_next_cursor = false;
        state.last_cursor = Some((x, y));
        return;
    }

    if let Some((last_x, last_y)) = state.last_cursor {
        // Screen y grows downward, pitch grows upward
        let dx = (x - last_x) as f32;
        let dy = (last_y - y) as f32;
        state.pending_look.push((dx, dy));
    }
    state.last_cursor = Some((x, y));
}

pub fn handle_scroll(state: &mut InputState, delta: MouseScrollDelta) {
    let dy = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_SCROLL_LINE,
    };
    state.pending_zoom.push(dy);
}

/// Record a window event. Returns true if the event was an input event.
pub fn handle_window_event(state: &mut InputState, event: &WindowEvent) -> bool {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if let PhysicalKey::Code(code) = event.physical_key {
                handle_key(
                    state,
                    code,
                    event.state == ElementState::Pressed,
                    event.repeat,
                );
            }
            true
        }
        WindowEvent::MouseInput { state: button_state, button, .. } => {
            handle_mouse_button(state, *button, *button_state == ElementState::Pressed);
            true
        }
        WindowEvent::CursorMoved { position, .. } => {
            handle_cursor_moved(state, position.x, position.y);
            true
        }
        WindowEvent::MouseWheel { delta, .. } => {
            handle_scroll(state, *delta);
            true
        }
        WindowEvent::Focused(false) => {
            // Key releases are lost while unfocused
            state.held.clear();
            state.dragging = false;
            true
        }
        _ => false,
    }
}

/// Apply everything accumulated since the last frame to the camera.
///
/// Held keys keep moving the camera every frame; one-shot events are cleared.
pub fn drain_into_camera(
    state: &mut InputState,
    camera: &CameraData,
    elapsed_seconds: f32,
) -> (CameraData, FrameActions) {
    let mut result = *camera;

    let projection_toggled = state.pending_toggles % 2 == 1;
    if projection_toggled {
        result = toggle_projection_mode(&result);
        log::info!("[Input] Projection mode: {:?}", result.projection_mode);
    }
    state.pending_toggles = 0;

    for (dx, dy) in state.pending_look.drain(..) {
        result = apply_look_delta(&result, dx, dy);
    }
    for dy in state.pending_zoom.drain(..) {
        result = apply_zoom_delta(&result, dy);
    }

    for movement in CameraMovement::ALL {
        if state.held.contains(&movement) {
            result = apply_movement(&result, movement, elapsed_seconds);
        }
    }

    let actions = FrameActions {
        quit: state.quit_requested,
        projection_toggled,
    };
    (result, actions)
}
