//! Surface textures draped over the terrain mesh.

use crate::TerrainError;
use image::DynamicImage;
use log::debug;
use std::path::Path;

/// Pixel layout of a decoded [`Texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit red, green, blue.
    Rgb,

    /// 8-bit red, green, blue, alpha.
    Rgba,
}

impl TextureFormat {
    /// Returns the number of bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// A decoded texture, ready for upload by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    format: TextureFormat,
    bytes: Box<[u8]>,
}

impl Texture {
    /// Returns the texture decoded from the raster at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TerrainError::Image {
            path: path.to_owned(),
            source,
        })?;
        let texture = Self::from_image(image);
        debug!(
            "loaded texture {path:?}; {}x{} {:?}",
            texture.width, texture.height, texture.format
        );
        Ok(texture)
    }

    /// Returns `image` as an RGB texture, or RGBA if it carries
    /// alpha.
    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (format, bytes) = if image.color().has_alpha() {
            (TextureFormat::Rgba, image.into_rgba8().into_raw())
        } else {
            (TextureFormat::Rgb, image.into_rgb8().into_raw())
        };
        Self {
            width,
            height,
            format,
            bytes: bytes.into_boxed_slice(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Returns tightly packed row-major pixel data.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
