//! Orientation estimator tuning.

use serde::{Deserialize, Serialize};

/// Low-pass filter and clamp settings for the sensor path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// EMA time constant τ in seconds (valid range: 0.0-2.0, 0 disables smoothing).
    pub filter_time_constant_secs: f64,
    /// Pitch clamp in degrees (valid range: 1.0-89.0).
    pub pitch_limit_deg: f64,
    /// `dt` assumed for the first sample and for non-increasing timestamps.
    pub default_sample_interval_secs: f64,
    /// Skip the orientation sensor and integrate angular rates instead.
    pub prefer_rate_sensor: bool,
}

impl OrientationConfig {
    pub fn pitch_limit_radians(&self) -> f32 {
        (self.pitch_limit_deg as f32).to_radians()
    }
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            filter_time_constant_secs: 0.1,
            pitch_limit_deg: 85.0,
            default_sample_interval_secs: 1.0 / 60.0,
            prefer_rate_sensor: false,
        }
    }
}
