//! Orientation estimator: raw sensor samples in, calibrated and smoothed
//! camera angle out.
//!
//! Per orientation sample:
//! 1. `dt` from consecutive timestamps (default interval on the first one)
//! 2. screen-orientation compensation
//! 3. latch the calibration offset on the first sample after (re)calibration
//! 4. subtract the offset, re-wrap yaw
//! 5. EMA low-pass on yaw and pitch
//! 6. clamp pitch and return the new angle
//!
//! Angular-rate samples skip steps 2-5 and are integrated directly.

use vista_common::{clamp_pitch, wrap_angle, CameraAngle, OrientationSample, ScreenOrientation};
use vista_config::schema::OrientationConfig;

use crate::compensation::compensate;
use crate::filter::{blend_factor, ema, ema_angle};

/// Tuning for [`OrientationEstimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorSettings {
    /// EMA time constant τ in seconds.
    pub time_constant: f32,
    /// Pitch clamp in radians.
    pub pitch_limit: f32,
    /// `dt` used when no previous timestamp is usable.
    pub default_dt: f32,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self::from(&OrientationConfig::default())
    }
}

impl From<&OrientationConfig> for EstimatorSettings {
    fn from(config: &OrientationConfig) -> Self {
        Self {
            time_constant: config.filter_time_constant_secs as f32,
            pitch_limit: config.pitch_limit_radians(),
            default_dt: config.default_sample_interval_secs as f32,
        }
    }
}

/// Reading captured at calibration time and subtracted from later readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationOffset {
    pub yaw0: f32,
    pub pitch0: f32,
}

#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    settings: EstimatorSettings,
    last_timestamp: Option<f64>,
    calibration: Option<CalibrationOffset>,
    filtered_yaw: f32,
    filtered_pitch: f32,
    /// Added to the filtered angle so the session can start at a chosen heading.
    bias: CameraAngle,
    viewport: (u32, u32),
}

impl OrientationEstimator {
    pub fn new(settings: EstimatorSettings) -> Self {
        Self {
            settings,
            last_timestamp: None,
            calibration: None,
            filtered_yaw: 0.0,
            filtered_pitch: 0.0,
            bias: CameraAngle::ZERO,
            viewport: (1, 1),
        }
    }

    /// Start from `initial` instead of straight ahead.
    pub fn with_initial(mut self, initial: CameraAngle) -> Self {
        self.bias = initial;
        self
    }

    /// Viewport size used to resolve `ScreenOrientation::Unknown`.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
    }

    pub fn calibration(&self) -> Option<CalibrationOffset> {
        self.calibration
    }

    /// Current published angle.
    pub fn angle(&self) -> CameraAngle {
        CameraAngle::with_limit(
            self.filtered_yaw + self.bias.yaw,
            self.filtered_pitch + self.bias.pitch,
            self.settings.pitch_limit,
        )
    }

    /// Feed one orientation-sensor sample.
    pub fn on_sample(
        &mut self,
        sample: &OrientationSample,
        screen: ScreenOrientation,
    ) -> CameraAngle {
        let dt = self.step_dt(sample.timestamp_secs);

        let (width, height) = self.viewport;
        let (yaw, pitch) = compensate(sample, screen.resolve(width, height));

        let offset = *self.calibration.get_or_insert_with(|| {
            tracing::debug!(yaw0 = yaw, pitch0 = pitch, "Orientation calibration latched");
            CalibrationOffset {
                yaw0: yaw,
                pitch0: pitch,
            }
        });

        let raw_yaw = wrap_angle(yaw - offset.yaw0);
        let raw_pitch = pitch - offset.pitch0;

        let k = blend_factor(dt, self.settings.time_constant);
        self.filtered_yaw = ema_angle(self.filtered_yaw, raw_yaw, k);
        self.filtered_pitch = clamp_pitch(
            ema(self.filtered_pitch, raw_pitch, k),
            self.settings.pitch_limit,
        );

        self.angle()
    }

    /// Feed one angular-rate sample (rad/s) and integrate it.
    ///
    /// `alpha` is the rate around device Z, `beta` around device X.
    pub fn on_rate_sample(&mut self, sample: &OrientationSample) -> CameraAngle {
        let dt = self.step_dt(sample.timestamp_secs);
        self.filtered_yaw = wrap_angle(self.filtered_yaw + sample.alpha * dt);
        self.filtered_pitch = clamp_pitch(
            self.filtered_pitch - sample.beta * dt,
            self.settings.pitch_limit,
        );
        self.angle()
    }

    /// Reset yaw, pitch and the filter state to zero.
    pub fn center(&mut self) -> CameraAngle {
        self.filtered_yaw = 0.0;
        self.filtered_pitch = 0.0;
        self.bias = CameraAngle::ZERO;
        self.angle()
    }

    /// Latch a new calibration offset from the next incoming sample.
    pub fn recalibrate(&mut self) {
        self.calibration = None;
    }

    fn step_dt(&mut self, timestamp: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(prev) if timestamp > prev => (timestamp - prev) as f32,
            _ => self.settings.default_dt,
        };
        self.last_timestamp = Some(timestamp);
        dt
    }
}

impl Default for OrientationEstimator {
    fn default() -> Self {
        Self::new(EstimatorSettings::default())
    }
}
