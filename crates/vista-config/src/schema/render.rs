//! Camera and sphere settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees (valid range: 30-150).
    pub fov_deg: f64,
    /// Panorama sphere radius in world units.
    pub sphere_radius: f64,
    pub near: f64,
    pub far: f64,
    pub latitude_segments: u32,
    pub longitude_segments: u32,
    /// Present with FIFO (vsync) instead of immediate mode.
    pub vsync: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_deg: 100.0,
            sphere_radius: 500.0,
            near: 1.0,
            far: 1100.0,
            latitude_segments: 40,
            longitude_segments: 60,
            vsync: true,
        }
    }
}
