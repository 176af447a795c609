use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vista_common::{AcquisitionError, ImageReference};

use super::AcquisitionStrategy;
use crate::decode::DecodeGate;
use crate::fetcher::ImageFetcher;
use crate::reference::{classify, ResolvedSource};
use crate::texture::{RawTexture, TextureSource};

/// Materialize bytes on disk, downscale to `max_width`, decode.
///
/// The time budget covers the download as well as the decode.
pub struct LocalStrategy {
    fetcher: Arc<dyn ImageFetcher>,
    gate: DecodeGate,
    timeout: Duration,
    max_width: u32,
    cache_dir: PathBuf,
}

impl LocalStrategy {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        gate: DecodeGate,
        timeout: Duration,
        max_width: u32,
        cache_dir: PathBuf,
    ) -> Self {
        Self {
            fetcher,
            gate,
            timeout,
            max_width,
            cache_dir,
        }
    }

    async fn run(&self, source: ResolvedSource) -> Result<RawTexture, AcquisitionError> {
        // A materialized file lives until decode finishes, then is removed.
        let (path, _scratch) = match source {
            ResolvedSource::Remote(url) => {
                let bytes = self.fetcher.fetch(&url).await?;
                let file = ScratchFile::write(&self.cache_dir, &bytes).await?;
                (file.path.clone(), Some(file))
            }
            ResolvedSource::Inline(bytes) => {
                let file = ScratchFile::write(&self.cache_dir, &bytes).await?;
                (file.path.clone(), Some(file))
            }
            ResolvedSource::Local(path) => (path, None),
        };

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            AcquisitionError::Failure(format!("cannot read {}: {e}", path.display()))
        })?;
        let image = self.gate.decode(bytes, Some(self.max_width)).await?;
        Ok(RawTexture::new(image, TextureSource::LocalResized))
    }
}

#[async_trait]
impl AcquisitionStrategy for LocalStrategy {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn attempt(&self, reference: &ImageReference) -> Result<RawTexture, AcquisitionError> {
        let source = classify(reference)?;
        tracing::debug!(source = %source.describe(), "Local acquisition starting");

        tokio::time::timeout(self.timeout, self.run(source))
            .await
            .map_err(|_| AcquisitionError::Timeout {
                strategy: self.name(),
                after_ms: self.timeout.as_millis() as u64,
            })?
    }
}

/// Temporary file in the cache directory, deleted on drop.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    async fn write(dir: &Path, bytes: &[u8]) -> Result<Self, AcquisitionError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AcquisitionError::Failure(format!("cannot create {}: {e}", dir.display()))
        })?;
        let path = dir.join(format!("panorama-{}", uuid::Uuid::new_v4()));
        let file = Self { path };
        tokio::fs::write(&file.path, bytes).await.map_err(|e| {
            AcquisitionError::Failure(format!("cannot write {}: {e}", file.path.display()))
        })?;
        Ok(file)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::debug!(path = %self.path.display(), "Scratch file not removed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::tests::png_bytes;

    #[tokio::test]
    async fn scratch_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = ScratchFile::write(dir.path(), &png_bytes(2, 2)).await.unwrap();
        let path = file.path.clone();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("panorama-"));
        drop(file);
        assert!(!path.exists());
    }
}
