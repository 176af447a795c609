//! Exponential-moving-average low-pass filter weighted by elapsed time.

use vista_common::wrap_angle;

/// Blend factor `1 - e^(-dt/τ)` for one filter step.
///
/// A non-positive time constant disables smoothing (factor 1).
pub fn blend_factor(dt: f32, time_constant: f32) -> f32 {
    if time_constant <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt.max(0.0) / time_constant).exp()
}

/// Linear EMA: `filtered += (raw - filtered) * k`.
pub fn ema(filtered: f32, raw: f32, k: f32) -> f32 {
    filtered + (raw - filtered) * k
}

/// EMA over angles: steps along the shortest arc so the filter does not
/// sweep through zero when the raw yaw crosses the ±π seam.
pub fn ema_angle(filtered: f32, raw: f32, k: f32) -> f32 {
    wrap_angle(filtered + wrap_angle(raw - filtered) * k)
}
