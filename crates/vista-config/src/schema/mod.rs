//! Configuration schema types for Vista.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod orientation;
mod render;
mod texture;
mod touch;
mod window;

pub use logging::*;
pub use orientation::*;
pub use render::*;
pub use texture::*;
pub use touch::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Vista.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VistaConfig {
    pub orientation: OrientationConfig,
    pub touch: TouchConfig,
    pub texture: TextureConfig,
    pub render: RenderConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}
