//! Panorama texture acquisition.
//!
//! [`TexturePipeline::load`] always produces a usable texture. It tries, in
//! order: a direct remote decode, a local download-resize-decode, the
//! procedural panorama, and the procedural test pattern. Every result gets
//! the same [`TextureSettings`].

pub mod decode;
pub mod fetcher;
pub mod pipeline;
pub mod procedural;
pub mod reference;
pub mod strategy;
pub mod texture;

pub use fetcher::{HttpFetcher, ImageFetcher};
pub use pipeline::TexturePipeline;
pub use procedural::{generate, ProceduralKind};
pub use reference::{classify, ResolvedSource};
pub use strategy::{AcquisitionStrategy, StrategyChain};
pub use texture::{
    ColorSpace, FilterMode, PanoramaTexture, RawTexture, TextureSettings, TextureSource, WrapMode,
};
