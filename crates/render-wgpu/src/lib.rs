//! wgpu render backend for blockworld.
//!
//! Draws a [`blockworld_render::Frame`]: flat-coloured tiles through one
//! pipeline, blocks with a texture per face through another. Every draw call
//! gets its own slot in a dynamic-offset uniform buffer.
//!
//! # Invariants
//! - The renderer never mutates the world or the camera.
//! - Missing face textures render with a placeholder, never fail the frame.

mod context;
mod gpu;
mod mesh;
mod shaders;
mod texture;
mod uniforms;

pub use context::GpuContext;
pub use gpu::WgpuRenderer;

use thiserror::Error;

/// Failures while bringing up the GPU or presenting to the surface.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("surface error: {0}")]
    Surface(wgpu::SurfaceError),
}

pub fn crate_info() -> &'static str {
    "blockworld-render-wgpu v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_works() {
        assert!(crate_info().contains("render-wgpu"));
    }

    #[test]
    fn shaders_declare_expected_entry_points() {
        assert!(shaders::COLOR_SHADER.contains("fn vs_color"));
        assert!(shaders::COLOR_SHADER.contains("fn fs_color"));
        assert!(shaders::TEXTURED_SHADER.contains("fn vs_textured"));
        assert!(shaders::TEXTURED_SHADER.contains("fn fs_textured"));
        assert!(shaders::TEXTURED_SHADER.contains("@group(2)"));
    }

    #[test]
    fn errors_render_readably() {
        assert_eq!(GpuError::NoAdapter.to_string(), "no compatible GPU adapter found");
    }
}
