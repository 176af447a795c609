//! Full configuration validation.
//!
//! Each section has its own submodule; every problem found is collected
//! into one `ConfigError` rather than stopping at the first.

mod input;
mod misc;
mod render;
mod texture;

#[cfg(test)]
mod tests;

use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::schema::VistaConfig;
use vista_common::ConfigError;

/// Problems found so far, one message per offending field.
#[derive(Debug, Default)]
pub(crate) struct Issues(Vec<String>);

impl Issues {
    /// Record `name` unless `value` lies in `range`. NaN never does.
    pub(crate) fn within<T: PartialOrd + Display>(
        &mut self,
        name: &str,
        value: T,
        range: RangeInclusive<T>,
    ) {
        if !range.contains(&value) {
            self.0.push(format!(
                "{name} = {value} is out of range [{}, {}]",
                range.start(),
                range.end()
            ));
        }
    }

    pub(crate) fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    fn into_result(self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(self.0.join("; ")))
        }
    }
}

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &VistaConfig) -> Result<(), ConfigError> {
    let mut issues = Issues::default();

    input::validate_orientation(&mut issues, &config.orientation);
    input::validate_touch(&mut issues, &config.touch);
    texture::validate_texture(&mut issues, &config.texture);
    render::validate_render(&mut issues, &config.render);
    misc::validate_window(&mut issues, &config.window);
    misc::validate_logging(&mut issues, &config.logging);

    issues.into_result()
}
