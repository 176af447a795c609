use async_trait::async_trait;
use vista_common::{AcquisitionError, ImageReference};

use super::AcquisitionStrategy;
use crate::procedural::{generate, ProceduralKind};
use crate::texture::{RawTexture, TextureSource};

/// Synthesizes a texture; ignores the reference.
pub struct ProceduralStrategy {
    kind: ProceduralKind,
}

impl ProceduralStrategy {
    pub fn new(kind: ProceduralKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl AcquisitionStrategy for ProceduralStrategy {
    fn name(&self) -> &'static str {
        match self.kind {
            ProceduralKind::Panorama => "procedural-panorama",
            ProceduralKind::Test => "procedural-test",
        }
    }

    async fn attempt(&self, _reference: &ImageReference) -> Result<RawTexture, AcquisitionError> {
        let kind = self.kind;
        // Off the async workers: the panorama is two million pixels of trig.
        let image = tokio::task::spawn_blocking(move || generate(kind))
            .await
            .map_err(|e| AcquisitionError::Failure(format!("procedural {kind} failed: {e}")))?;
        Ok(RawTexture::new(image, TextureSource::Procedural(kind)))
    }
}
