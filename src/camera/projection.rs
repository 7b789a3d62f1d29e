//! Projection policy
//!
//! Maps a projection mode and viewport to a clip-space matrix. Pure, no
//! state, safe to call every frame. Matrices use the GL clip convention
//! (depth in [-1, 1]); the renderer converts at upload.

use super::camera_data::ProjectionMode;
use crate::error::{EngineError, EngineResult};
use cgmath::{Deg, Matrix4};
use serde::{Deserialize, Serialize};

/// Render target size in pixels. Both dimensions are non-zero by construction,
/// so an aspect ratio derived from it is always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> EngineResult<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Clip planes and orthographic extent shared by both projection modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub near: f32,
    pub far: f32,
    /// Half height of the orthographic volume; half width is this times aspect
    pub ortho_half_height: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        use crate::constants::projection::*;
        Self {
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ortho_half_height: ORTHO_HALF_HEIGHT,
        }
    }
}

/// Build the camera projection matrix.
///
/// Orthographic uses the same near/far and the same aspect as perspective so
/// toggling modes live keeps depth range and proportions stable.
pub fn build_projection(
    mode: ProjectionMode,
    viewport: Viewport,
    fov: Deg<f32>,
    config: &ProjectionConfig,
) -> Matrix4<f32> {
    let aspect = viewport.aspect();
    match mode {
        ProjectionMode::Perspective => cgmath::perspective(fov, aspect, config.near, config.far),
        ProjectionMode::Orthographic => {
            let half_height = config.ortho_half_height;
            let half_width = half_height * aspect;
            cgmath::ortho(
                -half_width,
                half_width,
                -half_height,
                half_height,
                config.near,
                config.far,
            )
        }
    }
}
