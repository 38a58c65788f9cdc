//! Game configuration.
//!
//! Every field has a default that reproduces the fixed values the game was
//! tuned with (800×600 window, camera at (0, 5, 10) looking down -Z and 30°
//! below the horizon, 45° field of view). A YAML file may override any subset.

use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub grid: GridConfig,
    pub blocks: BlockConfig,
    /// Centre of the six-tile sample cluster, if drawn.
    pub sample_cluster: Option<[f32; 3]>,
    pub clear_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
            grid: GridConfig::default(),
            blocks: BlockConfig::default(),
            sample_cluster: Some([0.0, 0.5, -3.0]),
            clear_color: Color::new(0.5, 0.7, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Blockworld".into(),
        }
    }
}

/// Initial camera placement and tuning. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 10.0],
            yaw: -90.0,
            pitch: -30.0,
            movement_speed: 10.0,
            mouse_sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Flat checkerboard floor centred on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    /// Cells span `-half_extent..=half_extent` on both X and Z.
    pub half_extent: i32,
    pub light: Color,
    pub dark: Color,
}

impl GridConfig {
    /// Largest accepted half extent: a 513x513 floor, 263 169 tiles.
    pub const MAX_HALF_EXTENT: i32 = 256;
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            half_extent: 10,
            light: Color::new(0.55, 0.8, 0.4),
            dark: Color::new(0.3, 0.55, 0.2),
        }
    }
}

/// Textured blocks: one face set shared by every listed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub front: PathBuf,
    pub back: PathBuf,
    pub left: PathBuf,
    pub right: PathBuf,
    pub top: PathBuf,
    pub bottom: PathBuf,
    pub positions: Vec<[f32; 3]>,
}

impl Default for BlockConfig {
    fn default() -> Self {
        let side = PathBuf::from("resources/blocks/grass_side.png");
        Self {
            front: side.clone(),
            back: side.clone(),
            left: side.clone(),
            right: side,
            top: PathBuf::from("resources/blocks/grass_top.png"),
            bottom: PathBuf::from("resources/blocks/dirt.png"),
            positions: vec![[3.0, 0.5, -3.0], [4.0, 0.5, -3.0], [3.0, 1.5, -3.0]],
        }
    }
}

impl BlockConfig {
    /// Face texture paths in [`crate::Face::ALL`] order.
    pub fn face_paths(&self) -> [PathBuf; 6] {
        [
            self.front.clone(),
            self.back.clone(),
            self.left.clone(),
            self.right.clone(),
            self.top.clone(),
            self.bottom.clone(),
        ]
    }
}

impl GameConfig {
    /// Parse a YAML document. Missing fields keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        let p = &self.projection;
        if !(p.fov_degrees > 0.0 && p.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov must be in (0, 180), got {}",
                p.fov_degrees
            )));
        }
        if !(p.near > 0.0 && p.far > p.near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                p.near, p.far
            )));
        }
        let half = self.grid.half_extent;
        if !(0..=GridConfig::MAX_HALF_EXTENT).contains(&half) {
            return Err(ConfigError::Invalid(format!(
                "grid half_extent must be in 0..={}, got {half}",
                GridConfig::MAX_HALF_EXTENT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_tuning() {
        let c = GameConfig::default();
        assert_eq!((c.window.width, c.window.height), (800, 600));
        assert_eq!(c.camera.position, [0.0, 5.0, 10.0]);
        assert_eq!(c.camera.yaw, -90.0);
        assert_eq!(c.camera.pitch, -30.0);
        assert_eq!(c.camera.movement_speed, 10.0);
        assert_eq!(c.camera.mouse_sensitivity, 0.1);
        assert_eq!(c.projection.fov_degrees, 45.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c = GameConfig::from_yaml("camera:\n  movement_speed: 4.0\n").unwrap();
        assert_eq!(c.camera.movement_speed, 4.0);
        assert_eq!(c.camera.yaw, -90.0);
        assert_eq!(c.window.width, 800);
    }

    #[test]
    fn rejects_bad_clip_planes() {
        let err = GameConfig::from_yaml("projection:\n  near: 5.0\n  far: 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_oversized_grid() {
        let err = GameConfig::from_yaml("grid:\n  half_extent: 2000000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let max = format!("grid:\n  half_extent: {}\n", GridConfig::MAX_HALF_EXTENT);
        assert!(GameConfig::from_yaml(&max).is_ok());
        assert!(GameConfig::from_yaml("grid:\n  half_extent: -1\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.yaml");
        std::fs::write(&path, "window:\n  title: Test\ngrid:\n  half_extent: 2\n").unwrap();
        let c = GameConfig::load(&path).unwrap();
        assert_eq!(c.window.title, "Test");
        assert_eq!(c.grid.half_extent, 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn face_paths_follow_face_order() {
        let b = BlockConfig::default();
        let paths = b.face_paths();
        assert_eq!(paths[crate::Face::Top.index()], b.top);
        assert_eq!(paths[crate::Face::Bottom.index()], b.bottom);
    }
}
