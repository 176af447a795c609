//! TOML config file loading and creation.

mod loader;
mod paths;
mod template;


pub use loader::{load, load_default, load_from_path, parse_config, ConfigSource, LoadedConfig};
pub use paths::{default_config_path, resolve_cache_dir, write_default_config};
