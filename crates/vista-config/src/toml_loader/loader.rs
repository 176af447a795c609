//! Reading a config file into a [`LoadedConfig`].
//!
//! Nothing here logs. Loading usually happens before the subscriber is
//! installed, so the caller emits [`LoadedConfig::report`] once it is.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use vista_common::ConfigError;

use super::paths::{default_config_path, resolve_cache_dir, write_default_config};
use crate::schema::VistaConfig;
use crate::validation;

/// Where the loaded values came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file existed, so the commented template was written here.
    Created(PathBuf),
}

/// A parsed config and what validation made of it.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: VistaConfig,
    pub source: ConfigSource,
    /// Out-of-range values are kept as parsed; this says which ones.
    pub issues: Option<ConfigError>,
}

impl LoadedConfig {
    fn checked(config: VistaConfig, source: ConfigSource) -> Self {
        let issues = validation::validate(&config).err();
        Self {
            config,
            source,
            issues,
        }
    }

    /// Log where the config came from, the texture budgets it resolves to,
    /// and any validation issues.
    pub fn report(&self) {
        match &self.source {
            ConfigSource::File(path) => tracing::info!("Loaded config from {}", path.display()),
            ConfigSource::Created(path) => {
                tracing::info!("No config found; wrote defaults to {}", path.display())
            }
        }

        let texture = &self.config.texture;
        tracing::info!(
            remote_timeout_ms = texture.remote_timeout_ms,
            local_timeout_ms = texture.local_timeout_ms,
            max_width = texture.max_width,
            max_detached_decodes = texture.max_detached_decodes,
            cache_dir = %resolve_cache_dir(texture).display(),
            "Texture budgets"
        );

        if let Some(e) = &self.issues {
            tracing::warn!("Config validation warning: {e}; using parsed values anyway");
        }
    }
}

/// Parse TOML text. Missing sections and fields take their defaults.
pub fn parse_config(content: &str) -> Result<VistaConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("invalid TOML: {e}")))
}

/// Read and validate the config at `path`.
pub fn load_from_path(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };
    let config = parse_config(&content)?;
    Ok(LoadedConfig::checked(
        config,
        ConfigSource::File(path.to_path_buf()),
    ))
}

/// Read the config at the platform default path, writing the template
/// there first when no file exists.
pub fn load_default() -> Result<LoadedConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            write_default_config(&path)?;
            Ok(LoadedConfig::checked(
                VistaConfig::default(),
                ConfigSource::Created(path),
            ))
        }
        other => other,
    }
}

/// `path` when given, the platform default otherwise.
pub fn load(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    match path {
        Some(path) => load_from_path(path),
        None => load_default(),
    }
}
