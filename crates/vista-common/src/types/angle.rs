use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Default pitch limit: 85° expressed in radians.
pub const PITCH_LIMIT_RADIANS: f32 = 85.0 * PI / 180.0;

/// Wrap an angle in radians into `(-π, π]`.
///
/// Non-finite input collapses to `0.0` so a single bad sensor reading can
/// never poison the published camera angle.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    // f32 rounding can land exactly on -π after the shift above.
    if wrapped <= -PI {
        wrapped = PI;
    }
    wrapped
}

/// Clamp a pitch angle into `[-limit, limit]`; non-finite input becomes `0.0`.
pub fn clamp_pitch(pitch: f32, limit: f32) -> f32 {
    if !pitch.is_finite() {
        return 0.0;
    }
    pitch.clamp(-limit, limit)
}

/// Viewing direction in radians.
///
/// Values built through [`CameraAngle::new`] or [`CameraAngle::with_limit`]
/// always satisfy `yaw ∈ (-π, π]` and `|pitch| <= limit`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraAngle {
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraAngle {
    pub const ZERO: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
    };

    /// Normalized angle using the default ±85° pitch limit.
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self::with_limit(yaw, pitch, PITCH_LIMIT_RADIANS)
    }

    /// Normalized angle using a caller-supplied pitch limit (radians).
    pub fn with_limit(yaw: f32, pitch: f32, pitch_limit: f32) -> Self {
        Self {
            yaw: wrap_angle(yaw),
            pitch: clamp_pitch(pitch, pitch_limit),
        }
    }

    pub fn from_degrees(yaw_deg: f32, pitch_deg: f32) -> Self {
        Self::new(yaw_deg.to_radians(), pitch_deg.to_radians())
    }

    /// Pack both components into one `u64` (yaw in the high half).
    pub fn to_bits(self) -> u64 {
        ((self.yaw.to_bits() as u64) << 32) | self.pitch.to_bits() as u64
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            yaw: f32::from_bits((bits >> 32) as u32),
            pitch: f32::from_bits(bits as u32),
        }
    }
}
