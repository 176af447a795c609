//! Where Vista keeps its files: the config file and the texture scratch
//! directory.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use vista_common::ConfigError;

use super::template::default_config_toml;
use crate::schema::TextureConfig;

const APP_DIR: &str = "vista";
const CONFIG_FILE: &str = "config.toml";

/// `<config dir>/vista/config.toml`, e.g. `~/.config/vista/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Directory that downloaded and inline image bytes are written to.
///
/// `texture.cache_dir` wins when set (a leading `~` is expanded); otherwise
/// `<cache dir>/vista`, or `<temp dir>/vista` on platforms without one.
pub fn resolve_cache_dir(texture: &TextureConfig) -> PathBuf {
    match texture.cache_dir.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => expand_home(dir, dirs::home_dir()),
        _ => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR),
    }
}

fn expand_home(dir: &str, home: Option<PathBuf>) -> PathBuf {
    let rest = match dir.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(dir),
    };
    match home {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(dir),
    }
}

/// Write the commented template to `path` unless a file is already there.
///
/// Returns `true` when the template was written.
pub fn write_default_config(path: &Path) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!("cannot create {}: {e}", parent.display()))
        })?;
    }

    let write_err =
        |e: std::io::Error| ConfigError::ParseError(format!("cannot write {}: {e}", path.display()));
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(write_err(e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(write_err)?;
    Ok(true)
}
