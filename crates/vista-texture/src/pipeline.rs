//! The never-failing texture loader.

use std::sync::Arc;
use std::time::Duration;

use vista_common::ImageReference;
use vista_config::schema::TextureConfig;
use vista_config::toml_loader::resolve_cache_dir;

use crate::decode::DecodeGate;
use crate::fetcher::{HttpFetcher, ImageFetcher};
use crate::procedural::{generate, ProceduralKind};
use crate::strategy::{LocalStrategy, ProceduralStrategy, RemoteStrategy, StrategyChain};
use crate::texture::{PanoramaTexture, RawTexture, TextureSettings, TextureSource};

/// Every texture leaves with [`TextureSettings::default`]; the renderer
/// adjusts the color space to its surface when binding.
pub struct TexturePipeline {
    chain: StrategyChain,
}

impl TexturePipeline {
    /// Standard chain: remote, local, procedural panorama, procedural test.
    pub fn new(config: &TextureConfig, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let gate = DecodeGate::new(config.max_detached_decodes as usize);
        let chain = StrategyChain::new()
            .push(Arc::new(RemoteStrategy::new(
                Arc::clone(&fetcher),
                gate.clone(),
                Duration::from_millis(config.remote_timeout_ms),
            )))
            .push(Arc::new(LocalStrategy::new(
                fetcher,
                gate,
                Duration::from_millis(config.local_timeout_ms),
                config.max_width,
                resolve_cache_dir(config),
            )))
            .push(Arc::new(ProceduralStrategy::new(ProceduralKind::Panorama)))
            .push(Arc::new(ProceduralStrategy::new(ProceduralKind::Test)));
        Self { chain }
    }

    /// Pipeline with the network fetcher.
    pub fn http(config: &TextureConfig) -> Self {
        Self::new(config, Arc::new(HttpFetcher::new()))
    }

    pub fn with_chain(chain: StrategyChain) -> Self {
        Self { chain }
    }

    /// Resolve `reference` to a texture. Never fails.
    pub async fn load(&self, reference: &ImageReference) -> PanoramaTexture {
        if reference.is_empty() {
            tracing::info!("No image reference; using procedural panorama");
        }
        let raw = match self.chain.acquire(reference).await {
            Ok(raw) => raw,
            Err(errors) => {
                tracing::error!(
                    attempts = errors.len(),
                    "Every acquisition strategy failed; using test pattern"
                );
                RawTexture::new(
                    generate(ProceduralKind::Test),
                    TextureSource::Procedural(ProceduralKind::Test),
                )
            }
        };
        raw.finish(TextureSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::tests::png_bytes;
    use crate::strategy::AcquisitionStrategy;
    use crate::texture::{ColorSpace, FilterMode, WrapMode};
    use async_trait::async_trait;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;
    use vista_common::AcquisitionError;

    /// Fetcher that never resolves.
    struct PendingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageFetcher for PendingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, AcquisitionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    /// Fetcher that serves fixed bytes and counts calls.
    struct StaticFetcher {
        bytes: Vec<u8>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(bytes: Vec<u8>) -> Arc<Self> {
            Arc::new(Self {
                bytes,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ImageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, AcquisitionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.bytes.clone())
        }
    }

    /// First call fails, later calls succeed.
    struct FlakyFetcher {
        inner: Arc<StaticFetcher>,
    }

    #[async_trait]
    impl ImageFetcher for FlakyFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquisitionError> {
            if self.inner.calls.load(Ordering::SeqCst) == 0 {
                self.inner.calls.fetch_add(1, Ordering::SeqCst);
                return Err(AcquisitionError::Failure("connection reset".into()));
            }
            self.inner.fetch(url).await
        }
    }

    fn config(dir: &std::path::Path) -> TextureConfig {
        TextureConfig {
            remote_timeout_ms: 15_000,
            local_timeout_ms: 10_000,
            max_width: 16,
            cache_dir: Some(dir.to_string_lossy().into_owned()),
            max_detached_decodes: 2,
        }
    }

    fn assert_settings(tex: &PanoramaTexture) {
        assert_eq!(tex.settings.mag_filter, FilterMode::Linear);
        assert_eq!(tex.settings.wrap_s, WrapMode::ClampToEdge);
        assert_eq!(tex.settings.wrap_t, WrapMode::ClampToEdge);
        assert!(tex.settings.flip_y);
        assert_eq!(tex.settings.color_space, ColorSpace::Srgb);
    }

    #[tokio::test]
    async fn empty_reference_is_procedural_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StaticFetcher::new(png_bytes(4, 2));
        let pipeline = TexturePipeline::new(&config(dir.path()), fetcher.clone());

        let tex = pipeline.load(&ImageReference::none()).await;
        assert_eq!(tex.source, TextureSource::Procedural(ProceduralKind::Panorama));
        assert_eq!((tex.width(), tex.height()), (2048, 1024));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert_settings(&tex);
    }

    #[tokio::test]
    async fn insecure_uri_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StaticFetcher::new(png_bytes(4, 2));
        let pipeline = TexturePipeline::new(&config(dir.path()), fetcher.clone());

        let started = Instant::now();
        let tex = pipeline
            .load(&ImageReference::from_uri("http://example.com/pano.jpg"))
            .await;
        assert!(tex.is_procedural());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_settings(&tex);
    }

    #[tokio::test]
    async fn remote_success_keeps_full_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StaticFetcher::new(png_bytes(32, 16));
        let pipeline = TexturePipeline::new(&config(dir.path()), fetcher.clone());

        let tex = pipeline
            .load(&ImageReference::from_uri("https://example.com/pano.png"))
            .await;
        assert_eq!(tex.source, TextureSource::Remote);
        assert_eq!((tex.width(), tex.height()), (32, 16));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_settings(&tex);
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_local_resize() {
        let dir = tempfile::tempdir().unwrap();
        let inner = StaticFetcher::new(png_bytes(32, 16));
        let fetcher = Arc::new(FlakyFetcher {
            inner: inner.clone(),
        });
        let pipeline = TexturePipeline::new(&config(dir.path()), fetcher);

        let tex = pipeline
            .load(&ImageReference::from_uri("https://example.com/pano.png"))
            .await;
        assert_eq!(tex.source, TextureSource::LocalResized);
        assert_eq!((tex.width(), tex.height()), (16, 8));
        assert_settings(&tex);
        // Scratch download was cleaned up.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn inline_data_goes_through_local_strategy() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StaticFetcher::new(Vec::new());
        let pipeline = TexturePipeline::new(&config(dir.path()), fetcher.clone());

        let encoded = STANDARD.encode(png_bytes(8, 4));
        let tex = pipeline.load(&ImageReference::from_inline(encoded)).await;
        assert_eq!(tex.source, TextureSource::LocalResized);
        assert_eq!((tex.width(), tex.height()), (8, 4));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert_settings(&tex);
    }

    #[tokio::test]
    async fn malformed_inline_falls_to_procedural() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = TexturePipeline::new(&config(dir.path()), StaticFetcher::new(Vec::new()));
        let tex = pipeline.load(&ImageReference::from_inline("%%%not-base64%%%")).await;
        assert_eq!(tex.source, TextureSource::Procedural(ProceduralKind::Panorama));
        assert_settings(&tex);
    }

    #[tokio::test]
    async fn local_file_is_read_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("pano.png");
        std::fs::write(&image_path, png_bytes(64, 32)).unwrap();
        let cache = tempfile::tempdir().unwrap();
        let pipeline = TexturePipeline::new(&config(cache.path()), StaticFetcher::new(Vec::new()));

        let uri = format!("file://{}", image_path.display());
        let tex = pipeline.load(&ImageReference::from_uri(uri)).await;
        assert_eq!(tex.source, TextureSource::LocalResized);
        assert_eq!(tex.width(), 16);
        assert!(image_path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn hung_network_resolves_within_budget() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(PendingFetcher {
            calls: AtomicUsize::new(0),
        });
        let cfg = config(dir.path());
        let pipeline = TexturePipeline::new(&cfg, fetcher.clone());

        let started = tokio::time::Instant::now();
        let tex = pipeline
            .load(&ImageReference::from_uri("https://example.com/hang.jpg"))
            .await;
        let elapsed = started.elapsed();

        assert!(tex.is_procedural());
        assert_settings(&tex);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        let budget = Duration::from_millis(cfg.remote_timeout_ms + cfg.local_timeout_ms);
        assert!(elapsed >= budget, "{elapsed:?}");
        assert!(elapsed < budget + Duration::from_secs(1), "{elapsed:?}");
    }

    struct AlwaysFails;

    #[async_trait]
    impl AcquisitionStrategy for AlwaysFails {
        fn name(&self) -> &'static str {
            "always-fails"
        }

        async fn attempt(&self, _: &ImageReference) -> Result<RawTexture, AcquisitionError> {
            Err(AcquisitionError::Failure("broken".into()))
        }
    }

    #[tokio::test]
    async fn exhausted_chain_yields_test_pattern() {
        let pipeline =
            TexturePipeline::with_chain(StrategyChain::new().push(Arc::new(AlwaysFails)));
        let tex = pipeline.load(&ImageReference::none()).await;
        assert_eq!(tex.source, TextureSource::Procedural(ProceduralKind::Test));
        assert_eq!((tex.width(), tex.height()), (512, 256));
        assert_settings(&tex);
    }
}
