//! Validation for the sensor and touch input sections.

use crate::schema::{OrientationConfig, TouchConfig};

use super::Issues;

/// Drag sensitivities outside this make the camera either frozen or
/// uncontrollable.
const SENSITIVITY: std::ops::RangeInclusive<f64> = 0.0001..=0.1;

pub(crate) fn validate_orientation(issues: &mut Issues, o: &OrientationConfig) {
    issues.within(
        "orientation.filter_time_constant_secs",
        o.filter_time_constant_secs,
        0.0..=2.0,
    );
    // 90 would let the camera reach the pole, where yaw is undefined.
    issues.within("orientation.pitch_limit_deg", o.pitch_limit_deg, 1.0..=89.0);
    issues.within(
        "orientation.default_sample_interval_secs",
        o.default_sample_interval_secs,
        0.001..=1.0,
    );
}

pub(crate) fn validate_touch(issues: &mut Issues, t: &TouchConfig) {
    issues.within("touch.yaw_radians_per_pixel", t.yaw_radians_per_pixel, SENSITIVITY);
    issues.within("touch.pitch_radians_per_pixel", t.pitch_radians_per_pixel, SENSITIVITY);
}
