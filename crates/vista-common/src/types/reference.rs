use serde::{Deserialize, Serialize};

/// Reference to the panorama image for one viewing session.
///
/// `inline_data` holds base64 text of raw JPEG/PNG bytes. When neither field
/// is set the viewer shows the procedural panorama.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageReference {
    pub uri: Option<String>,
    pub inline_data: Option<String>,
}

impl ImageReference {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            inline_data: None,
        }
    }

    pub fn from_inline(base64: impl Into<String>) -> Self {
        Self {
            uri: None,
            inline_data: Some(base64.into()),
        }
    }

    /// True when there is nothing to load; blank strings count as absent.
    pub fn is_empty(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().map_or(true, |v| v.trim().is_empty());
        blank(&self.uri) && blank(&self.inline_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reference() {
        assert!(ImageReference::none().is_empty());
        assert!(ImageReference::from_uri("  ").is_empty());
        assert!(!ImageReference::from_uri("https://example.com/a.jpg").is_empty());
        assert!(!ImageReference::from_inline("aGVsbG8=").is_empty());
    }

    #[test]
    fn reference_serialization_defaults() {
        let parsed: ImageReference = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, ImageReference::none());
    }
}
