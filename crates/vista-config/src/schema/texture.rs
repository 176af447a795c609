//! Texture acquisition budgets.

use serde::{Deserialize, Serialize};

/// Default remote decode budget. Android's asset pipeline is slower, so it
/// gets the longer budget.
fn default_remote_timeout_ms() -> u64 {
    if cfg!(target_os = "android") {
        20_000
    } else {
        15_000
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Budget for the direct remote decode attempt.
    pub remote_timeout_ms: u64,
    /// Budget for the local download-resize-decode attempt.
    pub local_timeout_ms: u64,
    /// Images wider than this are downscaled before upload.
    pub max_width: u32,
    /// Where downloaded and inline bytes are materialized.
    /// Defaults to the platform cache directory.
    pub cache_dir: Option<String>,
    /// Upper bound on decodes left running after their timeout fired.
    pub max_detached_decodes: u32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            remote_timeout_ms: default_remote_timeout_ms(),
            local_timeout_ms: 10_000,
            max_width: 4096,
            cache_dir: None,
            max_detached_decodes: 2,
        }
    }
}
