use blendview_camera::{CameraArgs, CameraType, Projection};
use blendview_common::{Color, Viewport};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Top-level application configuration, loaded from YAML.
///
/// Every field has a default, so an empty document is a valid config that
/// reproduces the stock demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub input: InputConfig,
    pub projection: ProjectionConfig,
    pub clear_color: Color,
    /// Scene file to load instead of the built-in demo scene.
    pub scene: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            input: InputConfig::default(),
            projection: ProjectionConfig::default(),
            clear_color: Color::rgb(0.14, 0.14, 0.14),
            scene: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "blendview".into(),
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    #[serde(rename = "type")]
    pub camera_type: CameraType,
    pub position: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let args = CameraArgs::default();
        Self {
            camera_type: args.camera_type,
            position: args.position,
            yaw: args.yaw,
            pitch: args.pitch,
        }
    }
}

impl CameraConfig {
    pub fn args(&self) -> CameraArgs {
        CameraArgs {
            camera_type: self.camera_type,
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
            ..CameraArgs::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Degrees of turn per cursor pixel at `reference_fov`.
    pub sensitivity: f32,
    pub reference_fov: f32,
    pub initial_fov: f32,
    pub min_fov: f32,
    pub max_fov: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            reference_fov: 45.0,
            initial_fov: 45.0,
            min_fov: 1.0,
            max_fov: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        let p = Projection::default();
        Self {
            near: p.near,
            far: p.far,
        }
    }
}

impl ProjectionConfig {
    pub fn projection(&self, fov_degrees: f32, viewport: Viewport) -> Projection {
        Projection {
            fov_degrees,
            aspect: viewport.aspect(),
            near: self.near,
            far: self.far,
        }
    }
}

impl AppConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        // An empty file deserializes as unit; treat it as all defaults.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the camera and projection cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        let invalid = |msg: String| Err(AppError::InvalidConfig(msg));
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        let camera = &self.camera;
        if !(camera.position.is_finite() && camera.yaw.is_finite() && camera.pitch.is_finite()) {
            return invalid("camera position, yaw and pitch must be finite".into());
        }

        let input = &self.input;
        if !(input.sensitivity.is_finite() && input.sensitivity >= 0.0) {
            return invalid(format!("sensitivity must be >= 0, got {}", input.sensitivity));
        }
        if !positive(input.reference_fov) {
            return invalid(format!("reference_fov must be > 0, got {}", input.reference_fov));
        }
        if !(positive(input.min_fov) && input.min_fov <= input.max_fov && input.max_fov < 180.0) {
            return invalid(format!(
                "fov range must satisfy 0 < min <= max < 180, got [{}, {}]",
                input.min_fov, input.max_fov
            ));
        }

        let projection = &self.projection;
        if !(positive(projection.near) && projection.far > projection.near) {
            return invalid(format!(
                "projection must satisfy 0 < near < far, got near={} far={}",
                projection.near, projection.far
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.camera.camera_type, CameraType::Fly);
        assert_eq!(config.camera.position, Vec3::new(0.0, 0.5, 3.0));
        assert_eq!(config.camera.yaw, -75.0);
        assert_eq!(config.input.initial_fov, 45.0);
        assert_eq!(config.projection.near, 0.1);
        assert_eq!(config.projection.far, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml_str("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = r#"
camera:
  type: fps
  yaw: -90
input:
  sensitivity: 0.2
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.camera.camera_type, CameraType::Fps);
        assert_eq!(config.camera.yaw, -90.0);
        assert_eq!(config.camera.position, Vec3::new(0.0, 0.5, 3.0));
        assert_eq!(config.input.sensitivity, 0.2);
        assert_eq!(config.input.max_fov, 45.0);
    }

    #[test]
    fn yaml_round_trip() {
        let mut config = AppConfig::default();
        config.camera.camera_type = CameraType::Fps;
        config.scene = Some(PathBuf::from("scenes/demo.yaml"));
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(AppConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn rejects_bad_values() {
        for yaml in [
            "window: { width: 0 }",
            "projection: { near: 1.0, far: 0.5 }",
            "projection: { near: 0.0 }",
            "input: { min_fov: 50.0, max_fov: 45.0 }",
            "input: { sensitivity: -1.0 }",
            "input: { reference_fov: 0.0 }",
        ] {
            let err = AppConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, AppError::InvalidConfig(_)), "{yaml}: {err}");
        }
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = AppConfig::from_yaml_str("camera: { type: hover }").unwrap_err();
        assert!(matches!(err, AppError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "window: { title: test, width: 1024, height: 768 }\n").unwrap();
        let config = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(config.window.title, "test");
        assert!((config.window.viewport().aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn camera_args_and_projection() {
        let config = AppConfig::default();
        let args = config.camera.args();
        assert_eq!(args.position, config.camera.position);
        let p = config.projection.projection(30.0, Viewport::new(200, 100));
        assert_eq!(p.fov_degrees, 30.0);
        assert_eq!(p.aspect, 2.0);
    }
}
