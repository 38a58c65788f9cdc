//! CPU-side asset loading: static meshes, decoded textures, OBJ models.
//!
//! Nothing here touches the GPU. Backends upload [`MeshData`] and
//! [`TextureImage`] into their own resources and own those exclusively.

pub mod mesh;
pub mod obj;
pub mod texture;

pub use mesh::{MeshData, MeshVertex};
pub use obj::load_obj_mesh;
pub use texture::{TextureId, TextureImage};

use std::path::PathBuf;

pub fn crate_info() -> &'static str {
    "blockworld-assets v0.1.0"
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("OBJ {0} contains no triangles")]
    EmptyModel(PathBuf),
    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    PixelSize { width: u32, height: u32, len: usize },
}
