//! Observable viewer state reported to the shell for presentation only.

use serde::{Deserialize, Serialize};

/// Loading / error / ready flags published by the viewer.
///
/// No core logic reads these back; they exist so the shell can show a
/// spinner, an error with a retry affordance, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub ready: bool,
}

impl ViewerStatus {
    pub fn loading() -> Self {
        Self {
            loading: true,
            error: None,
            ready: false,
        }
    }

    pub fn ready() -> Self {
        Self {
            loading: false,
            error: None,
            ready: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(message.into()),
            ready: false,
        }
    }

    /// Short label used in window titles and logs.
    pub fn label(&self) -> &str {
        match (&self.error, self.ready, self.loading) {
            (Some(msg), _, _) => msg,
            (None, true, _) => "ready",
            (None, false, true) => "loading",
            (None, false, false) => "idle",
        }
    }
}

impl Default for ViewerStatus {
    fn default() -> Self {
        Self::loading()
    }
}
