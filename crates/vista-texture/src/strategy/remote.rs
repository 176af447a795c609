use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vista_common::{AcquisitionError, ImageReference};

use super::AcquisitionStrategy;
use crate::decode::DecodeGate;
use crate::fetcher::ImageFetcher;
use crate::reference::{classify, ResolvedSource};
use crate::texture::{RawTexture, TextureSource};

/// Direct fetch-and-decode of an `https` image at full resolution.
pub struct RemoteStrategy {
    fetcher: Arc<dyn ImageFetcher>,
    gate: DecodeGate,
    timeout: Duration,
}

impl RemoteStrategy {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, gate: DecodeGate, timeout: Duration) -> Self {
        Self {
            fetcher,
            gate,
            timeout,
        }
    }
}

#[async_trait]
impl AcquisitionStrategy for RemoteStrategy {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn attempt(&self, reference: &ImageReference) -> Result<RawTexture, AcquisitionError> {
        let url = match classify(reference)? {
            ResolvedSource::Remote(url) => url,
            other => {
                return Err(AcquisitionError::InvalidReference(format!(
                    "not a remote reference: {}",
                    other.describe()
                )))
            }
        };

        let work = async {
            let bytes = self.fetcher.fetch(&url).await?;
            self.gate.decode(bytes, None).await
        };

        let image = tokio::time::timeout(self.timeout, work)
            .await
            .map_err(|_| AcquisitionError::Timeout {
                strategy: self.name(),
                after_ms: self.timeout.as_millis() as u64,
            })??;

        Ok(RawTexture::new(image, TextureSource::Remote))
    }
}
