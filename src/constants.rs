//! Shared constants
//!
//! Defaults for the camera, projection and shadow map. Configuration
//! overrides most of these; the clamp limits are fixed.

/// Camera defaults and limits (degrees, world units, seconds)
pub mod camera {
    pub const DEFAULT_YAW: f32 = -90.0;
    pub const DEFAULT_PITCH: f32 = 0.0;
    pub const DEFAULT_ZOOM: f32 = 45.0;
    pub const DEFAULT_SENSITIVITY: f32 = 0.2;
    pub const DEFAULT_SPEED: f32 = 2.5;

    pub const PITCH_LIMIT: f32 = 89.0;
    pub const MIN_ZOOM: f32 = 1.0;
    pub const MAX_ZOOM: f32 = 45.0;

    /// Global up reference the basis is derived against
    pub const WORLD_UP: [f32; 3] = [0.0, 1.0, 0.0];
}

/// Camera projection defaults
pub mod projection {
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FAR_PLANE: f32 = 100.0;
    /// Half height of the orthographic view volume, scaled by aspect for width
    pub const ORTHO_HALF_HEIGHT: f32 = 1.0;
}

/// Shadow-casting light defaults
pub mod light {
    pub const POSITION: [f32; 3] = [-2.0, 4.0, -1.0];
    pub const TARGET: [f32; 3] = [0.0, 0.0, 0.0];
    pub const UP: [f32; 3] = [0.0, 1.0, 0.0];
    /// Smallest sine allowed between `up` and the light direction
    pub const MIN_UP_SINE: f32 = 1e-3;
    pub const NEAR_PLANE: f32 = 1.0;
    pub const FAR_PLANE: f32 = 20.0;
    pub const ORTHO_HALF_EXTENT: f32 = 10.0;
    pub const SHADOW_MAP_RESOLUTION: u32 = 1024;
    pub const MAX_SHADOW_MAP_RESOLUTION: u32 = 8192;
    pub const COLOR: [f32; 3] = [1.0, 1.0, 1.0];
}

/// Window defaults and limits
pub mod window {
    pub const TITLE: &str = "Illumination";
    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 600;
    pub const MAX_DIMENSION: u32 = 16384;
}

/// Render target formats
pub mod render {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    pub const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.1,
        g: 0.1,
        b: 0.1,
        a: 1.0,
    };
    /// Zoom units per scrolled pixel when the platform reports pixel deltas
    pub const PIXELS_PER_SCROLL_LINE: f32 = 40.0;
}
