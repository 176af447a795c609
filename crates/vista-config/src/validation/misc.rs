//! Validation for smaller config sections: window and logging.

use crate::schema::{LoggingConfig, WindowConfig};

use super::Issues;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub(crate) fn validate_window(issues: &mut Issues, w: &WindowConfig) {
    issues.within("window.width", w.width, 64..=16_384);
    issues.within("window.height", w.height, 64..=16_384);
}

pub(crate) fn validate_logging(issues: &mut Issues, l: &LoggingConfig) {
    if !LOG_LEVELS.contains(&l.level.to_ascii_lowercase().as_str()) {
        issues.push(format!(
            "logging.level = {:?} is not one of {}",
            l.level,
            LOG_LEVELS.join(", ")
        ));
    }
}
