//! Image decoding on the blocking pool.
//!
//! Decodes run under `spawn_blocking` and cannot be interrupted. When a
//! strategy times out, the decode keeps running detached and its result is
//! discarded. [`DecodeGate`] caps how many such decodes can exist at once:
//! each one holds a semaphore permit until it finishes.

use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use tokio::sync::Semaphore;
use vista_common::AcquisitionError;

#[derive(Debug, Clone)]
pub struct DecodeGate {
    permits: Arc<Semaphore>,
}

impl DecodeGate {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Permits not held by a running decode.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Decode `bytes`, downscaling to `max_width` when given.
    pub async fn decode(
        &self,
        bytes: Vec<u8>,
        max_width: Option<u32>,
    ) -> Result<RgbaImage, AcquisitionError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| AcquisitionError::Failure("decode gate closed".into()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            decode_blocking(&bytes, max_width)
        })
        .await
        .map_err(|e| AcquisitionError::Failure(format!("decode task failed: {e}")))?
    }
}

/// Synchronous decode + optional downscale.
pub fn decode_blocking(bytes: &[u8], max_width: Option<u32>) -> Result<RgbaImage, AcquisitionError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| AcquisitionError::Failure(format!("decode failed: {e}")))?;
    let image = match max_width {
        Some(max) => downscale(image, max),
        None => image,
    };
    Ok(image.into_rgba8())
}

/// Shrink `image` to at most `max_width` pixels wide, keeping aspect ratio.
pub fn downscale(image: DynamicImage, max_width: u32) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    if max_width == 0 || w <= max_width {
        return image;
    }
    let new_h = ((h as u64 * max_width as u64) / w as u64).max(1) as u32;
    tracing::debug!(from = w, to = max_width, "Downscaling panorama");
    image.resize_exact(max_width, new_h, FilterType::Triangle)
}
