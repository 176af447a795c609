//! Validation for texture acquisition budgets.

use crate::schema::TextureConfig;

use super::Issues;

/// Shortest and longest budget a single acquisition attempt may get.
const TIMEOUT_MS: std::ops::RangeInclusive<u64> = 100..=120_000;

pub(crate) fn validate_texture(issues: &mut Issues, t: &TextureConfig) {
    issues.within("texture.remote_timeout_ms", t.remote_timeout_ms, TIMEOUT_MS);
    issues.within("texture.local_timeout_ms", t.local_timeout_ms, TIMEOUT_MS);
    issues.within("texture.max_width", t.max_width, 256..=16_384);
    issues.within("texture.max_detached_decodes", t.max_detached_decodes, 1..=16);
    if t.cache_dir.as_deref().is_some_and(|dir| dir.trim().is_empty()) {
        issues.push("texture.cache_dir must not be empty when set");
    }
}
