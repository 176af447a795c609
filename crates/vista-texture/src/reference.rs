//! Classify an [`ImageReference`] into a concrete byte source.
//!
//! Accepted forms:
//! - `https://…` remote image
//! - `data:<mime>;base64,<payload>` inline image
//! - `file://<path>` or a bare filesystem path
//! - `inline_data`: base64 text, optionally with a `data:` prefix
//!
//! Plain `http://` and any other scheme are rejected up front.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use vista_common::{AcquisitionError, ImageReference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    Remote(String),
    Inline(Vec<u8>),
    Local(PathBuf),
}

impl ResolvedSource {
    pub fn describe(&self) -> String {
        match self {
            ResolvedSource::Remote(url) => url.clone(),
            ResolvedSource::Inline(bytes) => format!("<inline {} bytes>", bytes.len()),
            ResolvedSource::Local(path) => path.display().to_string(),
        }
    }
}

/// Resolve `reference` without touching the network or the filesystem.
pub fn classify(reference: &ImageReference) -> Result<ResolvedSource, AcquisitionError> {
    let uri = non_blank(&reference.uri);
    let inline = non_blank(&reference.inline_data);

    match (uri, inline) {
        (Some(uri), inline) => {
            if inline.is_some() {
                tracing::warn!("Image reference has both uri and inline data; using uri");
            }
            classify_uri(uri)
        }
        (None, Some(data)) => decode_inline(data).map(ResolvedSource::Inline),
        (None, None) => Err(AcquisitionError::InvalidReference(
            "reference has neither uri nor inline data".into(),
        )),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn classify_uri(uri: &str) -> Result<ResolvedSource, AcquisitionError> {
    let lower = uri.to_ascii_lowercase();

    if lower.starts_with("https://") {
        return reqwest::Url::parse(uri)
            .map(|_| ResolvedSource::Remote(uri.to_string()))
            .map_err(|e| AcquisitionError::InvalidReference(format!("malformed url: {e}")));
    }
    if lower.starts_with("http://") {
        return Err(AcquisitionError::InvalidReference(
            "insecure scheme http".into(),
        ));
    }
    if lower.starts_with("data:") {
        return decode_inline(uri).map(ResolvedSource::Inline);
    }
    if let Some(path) = uri.strip_prefix("file://") {
        return Ok(ResolvedSource::Local(PathBuf::from(path)));
    }
    if let Some((scheme, _)) = uri.split_once("://") {
        return Err(AcquisitionError::InvalidReference(format!(
            "unsupported scheme {scheme}"
        )));
    }
    Ok(ResolvedSource::Local(PathBuf::from(uri)))
}

/// Decode base64 text, accepting an optional `data:…;base64,` prefix.
fn decode_inline(data: &str) -> Result<Vec<u8>, AcquisitionError> {
    let payload = match data.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                AcquisitionError::InvalidReference("data uri without payload".into())
            })?;
            if !header.ends_with(";base64") {
                return Err(AcquisitionError::InvalidReference(
                    "data uri is not base64".into(),
                ));
            }
            payload
        }
        None => data,
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AcquisitionError::InvalidReference(format!("malformed inline data: {e}")))?;
    if bytes.is_empty() {
        return Err(AcquisitionError::InvalidReference("inline data is empty".into()));
    }
    Ok(bytes)
}
