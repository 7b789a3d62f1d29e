//! Error handling for the illumination demo
//!
//! One error type for everything that can fail at startup or per frame.
//! Clamp conditions (pitch, zoom) are not errors and never reach this module.

use std::error::Error as StdError;
use std::fmt;

/// Main error type for the demo
#[derive(Debug)]
pub enum EngineError {
    // Geometry / precondition errors
    InvalidViewport {
        width: u32,
        height: u32,
    },

    // Resource errors
    TextureNotFound {
        path: String,
    },
    TextureDecode {
        path: String,
        error: String,
    },
    ShaderCompilation {
        source: String,
        error: String,
    },
    RenderPipelineError {
        error: String,
    },
    ShadowMapUnavailable {
        resolution: u32,
        error: String,
    },

    // GPU / window errors
    DeviceNotFound,
    SurfaceError {
        error: String,
    },
    InitializationError(String),

    // Configuration errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // Frame sequencing
    StateError {
        expected: String,
        actual: String,
    },

    Internal {
        message: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidViewport { width, height } => write!(
                f,
                "Invalid viewport {}x{}: both dimensions must be non-zero",
                width, height
            ),

            EngineError::TextureNotFound { path } => write!(f, "Texture not found: {}", path),
            EngineError::TextureDecode { path, error } => {
                write!(f, "Texture decode failed for {}: {}", path, error)
            }
            EngineError::ShaderCompilation { source, error } => {
                write!(f, "Shader compilation failed for {}: {}", source, error)
            }
            EngineError::RenderPipelineError { error } => {
                write!(f, "Render pipeline error: {}", error)
            }
            EngineError::ShadowMapUnavailable { resolution, error } => write!(
                f,
                "Shadow map target {}x{} could not be created: {}",
                resolution, resolution, error
            ),

            EngineError::DeviceNotFound => write!(f, "GPU device not found"),
            EngineError::SurfaceError { error } => write!(f, "Surface error: {}", error),
            EngineError::InitializationError(msg) => write!(f, "Initialization error: {}", msg),

            EngineError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),

            EngineError::StateError { expected, actual } => {
                write!(f, "State error: expected {}, actual {}", expected, actual)
            }

            EngineError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl StdError for EngineError {}

/// Type alias for Results in the demo
pub type EngineResult<T> = Result<T, EngineError>;

impl From<wgpu::SurfaceError> for EngineError {
    fn from(error: wgpu::SurfaceError) -> Self {
        EngineError::SurfaceError {
            error: error.to_string(),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for EngineError {
    fn from(error: wgpu::CreateSurfaceError) -> Self {
        EngineError::SurfaceError {
            error: error.to_string(),
        }
    }
}

impl From<wgpu::RequestDeviceError> for EngineError {
    fn from(error: wgpu::RequestDeviceError) -> Self {
        EngineError::InitializationError(format!("request_device failed: {}", error))
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError,
    {
        self.ok_or_else(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidViewport {
            width: 0,
            height: 600,
        };
        assert_eq!(
            err.to_string(),
            "Invalid viewport 0x600: both dimensions must be non-zero"
        );
    }

    #[test]
    fn test_state_error_display() {
        let err = EngineError::StateError {
            expected: "Idle".to_string(),
            actual: "DepthPass".to_string(),
        };
        assert_eq!(err.to_string(), "State error: expected Idle, actual DepthPass");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = EngineError::InvalidConfig {
            field: "light.up".to_string(),
            value: "[0.0, 1.0, 0.0]".to_string(),
            reason: "must not be parallel to the light direction".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config: light.up = [0.0, 1.0, 0.0] (must not be parallel to the light direction)"
        );
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_engine(|| EngineError::DeviceNotFound);
        assert!(matches!(result, Err(EngineError::DeviceNotFound)));
    }
}
