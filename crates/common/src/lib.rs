//! Shared types for the blockworld crates: transforms, colours, cube faces
//! and the game configuration.

pub mod config;
pub mod types;

pub use config::{
    BlockConfig, CameraConfig, ConfigError, GameConfig, GridConfig, ProjectionConfig,
    WindowConfig,
};
pub use types::{Color, Face, Transform};
