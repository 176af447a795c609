//! Acquisition strategies and the first-success chain that runs them.

mod local;
mod procedural;
mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use vista_common::{AcquisitionError, ImageReference};

use crate::texture::RawTexture;

pub use local::LocalStrategy;
pub use procedural::ProceduralStrategy;
pub use remote::RemoteStrategy;

/// One way of turning an [`ImageReference`] into pixels.
#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Short name used in logs and timeout errors.
    fn name(&self) -> &'static str;

    async fn attempt(&self, reference: &ImageReference) -> Result<RawTexture, AcquisitionError>;
}

/// Runs strategies in order and returns the first success.
#[derive(Clone, Default)]
pub struct StrategyChain {
    strategies: Vec<Arc<dyn AcquisitionStrategy>>,
}

impl StrategyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, strategy: Arc<dyn AcquisitionStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// First successful result, or the errors of every strategy in order.
    pub async fn acquire(
        &self,
        reference: &ImageReference,
    ) -> Result<RawTexture, Vec<(&'static str, AcquisitionError)>> {
        let mut errors = Vec::new();
        for strategy in &self.strategies {
            match strategy.attempt(reference).await {
                Ok(texture) => {
                    tracing::info!(
                        strategy = strategy.name(),
                        width = texture.image.width(),
                        height = texture.image.height(),
                        "Panorama texture acquired"
                    );
                    return Ok(texture);
                }
                Err(e) if e.is_fast_fail() => {
                    tracing::debug!(strategy = strategy.name(), "Skipped: {e}");
                    errors.push((strategy.name(), e));
                }
                Err(e) => {
                    tracing::warn!(strategy = strategy.name(), "Acquisition attempt failed: {e}");
                    errors.push((strategy.name(), e));
                }
            }
        }
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureSource;
    use image::RgbaImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        name: &'static str,
        outcome: Result<(), AcquisitionError>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(name: &'static str, outcome: Result<(), AcquisitionError>) -> Arc<Self> {
            Arc::new(Self {
                name,
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AcquisitionStrategy for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn attempt(&self, _: &ImageReference) -> Result<RawTexture, AcquisitionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome
                .clone()
                .map(|_| RawTexture::new(RgbaImage::new(2, 1), TextureSource::Remote))
        }
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let first = Scripted::new("first", Err(AcquisitionError::Failure("nope".into())));
        let second = Scripted::new("second", Ok(()));
        let third = Scripted::new("third", Ok(()));
        let chain = StrategyChain::new()
            .push(first.clone())
            .push(second.clone())
            .push(third.clone());

        assert!(chain.acquire(&ImageReference::none()).await.is_ok());
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
        assert_eq!(third.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn collects_every_error() {
        let chain = StrategyChain::new()
            .push(Scripted::new("a", Err(AcquisitionError::InvalidReference("x".into()))))
            .push(Scripted::new(
                "b",
                Err(AcquisitionError::Timeout {
                    strategy: "b",
                    after_ms: 5,
                }),
            ));
        let errors = chain.acquire(&ImageReference::none()).await.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].0, "a");
        assert!(errors[0].1.is_fast_fail());
        assert!(matches!(errors[1].1, AcquisitionError::Timeout { .. }));
    }

    #[tokio::test]
    async fn empty_chain_fails() {
        let chain = StrategyChain::new();
        assert!(chain.is_empty());
        assert!(chain.acquire(&ImageReference::none()).await.unwrap_err().is_empty());
    }
}
