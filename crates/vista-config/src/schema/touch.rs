//! Drag-to-look sensitivity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Yaw change per horizontal pixel of drag.
    pub yaw_radians_per_pixel: f64,
    /// Pitch change per vertical pixel of drag.
    pub pitch_radians_per_pixel: f64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            yaw_radians_per_pixel: 0.005,
            pitch_radians_per_pixel: 0.003,
        }
    }
}
