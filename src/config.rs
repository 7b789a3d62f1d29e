//! Demo configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Loaded from TOML.

use crate::camera::{CameraConfig, ProjectionConfig};
use crate::constants::{camera as camera_limits, light as light_limits, window as window_defaults};
use crate::error::{EngineError, EngineResult};
use crate::lighting::{LightConfig, LightProjection};
use crate::scene::StageConfig;
use cgmath::{InnerSpace, Vector3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] EngineError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: window_defaults::TITLE.to_string(),
            width: window_defaults::WIDTH,
            height: window_defaults::HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Window quad texture; a procedural texture is used when unset
    pub window_texture: Option<PathBuf>,
}

/// Top-level demo configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub light: LightConfig,
    pub stages: StageConfig,
    pub assets: AssetConfig,
}

fn invalid(field: &str, value: impl std::fmt::Display, reason: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl DemoConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        log::info!("[DemoConfig] Loaded {}", path.display());
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> EngineResult<()> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(invalid(
                "window.size",
                format!("{}x{}", window.width, window.height),
                "dimensions must be non-zero",
            ));
        }
        if window.width > window_defaults::MAX_DIMENSION
            || window.height > window_defaults::MAX_DIMENSION
        {
            return Err(invalid(
                "window.size",
                format!("{}x{}", window.width, window.height),
                "dimensions exceed 16384",
            ));
        }

        let projection = &self.projection;
        if !(projection.near > 0.0) {
            return Err(invalid("projection.near", projection.near, "must be positive"));
        }
        if !(projection.far > projection.near) {
            return Err(invalid("projection.far", projection.far, "must exceed near"));
        }
        if !(projection.ortho_half_height > 0.0) {
            return Err(invalid(
                "projection.ortho_half_height",
                projection.ortho_half_height,
                "must be positive",
            ));
        }

        let camera = &self.camera;
        if !(camera_limits::MIN_ZOOM..=camera_limits::MAX_ZOOM).contains(&camera.zoom_degrees) {
            return Err(invalid(
                "camera.zoom_degrees",
                camera.zoom_degrees,
                "must be within [1, 45]",
            ));
        }
        if !(-camera_limits::PITCH_LIMIT..=camera_limits::PITCH_LIMIT)
            .contains(&camera.pitch_degrees)
        {
            return Err(invalid(
                "camera.pitch_degrees",
                camera.pitch_degrees,
                "must be within [-89, 89]",
            ));
        }
        if !(camera.movement_speed >= 0.0) {
            return Err(invalid("camera.movement_speed", camera.movement_speed, "must not be negative"));
        }
        if !(camera.sensitivity >= 0.0) {
            return Err(invalid("camera.sensitivity", camera.sensitivity, "must not be negative"));
        }
        if camera.world_up == [0.0, 0.0, 0.0] {
            return Err(invalid("camera.world_up", "[0, 0, 0]", "must be non-zero"));
        }

        self.validate_light()?;

        log::debug!("[DemoConfig] Configuration validated successfully");
        Ok(())
    }

    fn validate_light(&self) -> EngineResult<()> {
        let light = &self.light;
        if light.position == light.target {
            return Err(invalid(
                "light.position",
                format!("{:?}", light.position),
                "must differ from light.target",
            ));
        }

        // look_at degenerates to NaN when up is zero or along the view direction
        let up = Vector3::from(light.up);
        if !(up.magnitude2() > 0.0) {
            return Err(invalid("light.up", format!("{:?}", light.up), "must be non-zero"));
        }
        let direction = (Vector3::from(light.target) - Vector3::from(light.position)).normalize();
        if !(direction.cross(up.normalize()).magnitude() >= light_limits::MIN_UP_SINE) {
            return Err(invalid(
                "light.up",
                format!("{:?}", light.up),
                "must not be parallel to the light direction",
            ));
        }
        if !(light.near > 0.0) {
            return Err(invalid("light.near", light.near, "must be positive"));
        }
        if !(light.far > light.near) {
            return Err(invalid("light.far", light.far, "must exceed near"));
        }

        let resolution = light.shadow_map_resolution;
        if resolution == 0
            || !resolution.is_power_of_two()
            || resolution > light_limits::MAX_SHADOW_MAP_RESOLUTION
        {
            return Err(invalid(
                "light.shadow_map_resolution",
                resolution,
                "must be a power of two no larger than 8192",
            ));
        }

        match light.projection {
            LightProjection::Orthographic { half_extent } if !(half_extent > 0.0) => Err(invalid(
                "light.projection.half_extent",
                half_extent,
                "must be positive",
            )),
            LightProjection::Perspective { fov_degrees }
                if !(fov_degrees > 0.0 && fov_degrees < 180.0) =>
            {
                Err(invalid(
                    "light.projection.fov_degrees",
                    fov_degrees,
                    "must be within (0, 180)",
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            [window]
            width = 1280

            [stages]
            enable_window_quad = false

            [light.projection]
            kind = "perspective"
            fov_degrees = 90.0
        "#;
        let config = DemoConfig::from_toml_str(text, Path::new("inline")).expect("valid config");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert!(!config.stages.enable_window_quad);
        assert!(config.stages.enable_shadows);
        assert_eq!(
            config.light.projection,
            LightProjection::Perspective { fov_degrees: 90.0 }
        );
    }

    #[test]
    fn test_projection_mode_parses() {
        let text = r#"
            [camera]
            projection_mode = "orthographic"

            [projection]
            ortho_half_height = 2.0
        "#;
        let config = DemoConfig::from_toml_str(text, Path::new("inline")).expect("valid config");
        assert_eq!(
            config.camera.projection_mode,
            crate::camera::ProjectionMode::Orthographic
        );
        assert_eq!(config.projection.ortho_half_height, 2.0);
    }

    #[test]
    fn test_rejects_bad_clip_planes() {
        let mut config = DemoConfig::default();
        config.projection.near = 0.0;
        assert!(config.validate().is_err());

        let mut config = DemoConfig::default();
        config.projection.far = config.projection.near;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_power_of_two_shadow_map() {
        let mut config = DemoConfig::default();
        config.light.shadow_map_resolution = 1000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("light.shadow_map_resolution"));
    }

    #[test]
    fn test_rejects_light_looking_at_itself() {
        let mut config = DemoConfig::default();
        config.light.target = config.light.position;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_light_up_parallel_to_direction() {
        let mut config = DemoConfig::default();
        config.light.position = [0.0, 5.0, 0.0];
        config.light.target = [0.0, 0.0, 0.0];

        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "light.up"),
            other => panic!("expected light.up to be rejected, got {:?}", other),
        }

        // Straight down is fine once up is off the view axis
        config.light.up = [0.0, 0.0, -1.0];
        assert!(config.validate().is_ok());
        let transform = crate::lighting::compute_light_space(&config.light);
        let cols: [[f32; 4]; 4] = transform.light_space.into();
        assert!(cols.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rejects_zero_light_up() {
        let mut config = DemoConfig::default();
        config.light.up = [0.0, 0.0, 0.0];
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { field, .. }) if field == "light.up"
        ));
    }

    #[test]
    fn test_rejects_zero_window() {
        let mut config = DemoConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_fail_loading() {
        let text = "[camera]\nzoom_degrees = 80.0\n";
        let err = DemoConfig::from_toml_str(text, Path::new("inline")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[window]\ntitle = \"Shadows\"").expect("write config");
        let config = DemoConfig::load(file.path()).expect("load config");
        assert_eq!(config.window.title, "Shadows");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[window\nwidth = ").expect("write config");
        assert!(matches!(
            DemoConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            DemoConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = DemoConfig::default();
        let text = toml::to_string(&config).expect("serialize");
        let parsed = DemoConfig::from_toml_str(&text, Path::new("inline")).expect("parse");
        assert_eq!(parsed, config);
    }
}
