use crate::AssetError;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Content-addressed texture ID computed from the decoded pixels.
///
/// Two files with identical pixels share an ID, so backends can upload them
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// A decoded RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize * 4 {
            return Err(AssetError::PixelSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file (PNG or JPEG) into RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(decoded.to_rgba8()))
    }

    /// Decode `path`, or log a warning and fall back to [`Self::placeholder`].
    ///
    /// A missing texture shows up as a magenta checker instead of stopping
    /// the game.
    pub fn load_or_placeholder(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(image) => {
                tracing::debug!(path = %path.display(), image.width, image.height, "texture loaded");
                image
            }
            Err(e) => {
                tracing::warn!("{e}; using placeholder texture");
                Self::placeholder()
            }
        }
    }

    /// 2x2 magenta/black checker.
    pub fn placeholder() -> Self {
        const M: [u8; 4] = [255, 0, 255, 255];
        const K: [u8; 4] = [0, 0, 0, 255];
        Self {
            width: 2,
            height: 2,
            pixels: [M, K, K, M].concat(),
        }
    }

    /// Whether both sides are at most `max_dimension` texels.
    pub fn fits_within(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }

    /// Full mip chain, level 0 first, halving each dimension down to 1x1.
    pub fn mip_chain(&self) -> Vec<TextureImage> {
        let mut levels = vec![self.clone()];
        let Some(base) = RgbaImage::from_raw(self.width, self.height, self.pixels.clone()) else {
            return levels;
        };
        let (mut w, mut h) = (self.width, self.height);
        while w > 1 || h > 1 {
            w = (w / 2).max(1);
            h = (h / 2).max(1);
            levels.push(Self::from_image(imageops::resize(
                &base,
                w,
                h,
                FilterType::Triangle,
            )));
        }
        levels
    }

    pub fn content_id(&self) -> TextureId {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.pixels);
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        TextureId(u64::from_le_bytes(bytes))
    }

    fn from_image(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }
}
