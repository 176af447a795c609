//! Texture value types and the sampling settings shared by every texture.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::procedural::ProceduralKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
}

/// How texel values are interpreted when sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Explicit sRGB tagging; the GPU linearizes on sample.
    Srgb,
    /// No tagging support; bytes are uploaded as-is and flagged as encoded.
    LegacyEncoding,
}

/// Sampling settings applied to every panorama texture.
///
/// Clamp (not repeat) on both axes keeps the poles and the prime meridian
/// free of seams on a sphere-mapped equirectangular image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSettings {
    pub mag_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub flip_y: bool,
    pub color_space: ColorSpace,
}

impl TextureSettings {
    pub fn panorama(supports_color_space: bool) -> Self {
        Self {
            mag_filter: FilterMode::Linear,
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
            flip_y: true,
            color_space: if supports_color_space {
                ColorSpace::Srgb
            } else {
                ColorSpace::LegacyEncoding
            },
        }
    }
}

impl TextureSettings {
    /// Same sampling, color space chosen for the target's capability.
    pub fn with_color_space_support(self, supported: bool) -> Self {
        Self {
            color_space: Self::panorama(supported).color_space,
            ..self
        }
    }
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self::panorama(true)
    }
}

/// Which acquisition step produced a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSource {
    Remote,
    LocalResized,
    Procedural(ProceduralKind),
}

/// Decoded pixels before settings are applied.
#[derive(Debug, Clone)]
pub struct RawTexture {
    pub image: RgbaImage,
    pub source: TextureSource,
}

impl RawTexture {
    pub fn new(image: RgbaImage, source: TextureSource) -> Self {
        Self { image, source }
    }

    pub fn finish(self, settings: TextureSettings) -> PanoramaTexture {
        PanoramaTexture {
            image: self.image,
            settings,
            source: self.source,
        }
    }
}

/// A texture ready for upload.
#[derive(Debug, Clone)]
pub struct PanoramaTexture {
    pub image: RgbaImage,
    pub settings: TextureSettings,
    pub source: TextureSource,
}

impl PanoramaTexture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_procedural(&self) -> bool {
        matches!(self.source, TextureSource::Procedural(_))
    }
}
