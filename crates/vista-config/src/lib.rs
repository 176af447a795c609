//! Vista configuration system.
//!
//! TOML-based configuration with validation. All sections use sensible
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vista_config::{config_to_json, toml_loader};
//!
//! let loaded = toml_loader::load(None).expect("failed to load config");
//! loaded.report();
//! println!("{}", config_to_json(&loaded.config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{VistaConfig, CONFIG_SCHEMA_VERSION};

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &VistaConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
