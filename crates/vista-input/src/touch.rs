//! Drag-to-look controller used when motion sensors are off.

use vista_common::{clamp_pitch, wrap_angle, CameraAngle, PITCH_LIMIT_RADIANS};
use vista_config::schema::{OrientationConfig, TouchConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSettings {
    pub yaw_per_pixel: f32,
    pub pitch_per_pixel: f32,
    pub pitch_limit: f32,
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            yaw_per_pixel: 0.005,
            pitch_per_pixel: 0.003,
            pitch_limit: PITCH_LIMIT_RADIANS,
        }
    }
}

impl TouchSettings {
    pub fn from_config(touch: &TouchConfig, orientation: &OrientationConfig) -> Self {
        Self {
            yaw_per_pixel: touch.yaw_radians_per_pixel as f32,
            pitch_per_pixel: touch.pitch_radians_per_pixel as f32,
            pitch_limit: orientation.pitch_limit_radians(),
        }
    }
}

/// Turns pointer drags into camera angle changes.
///
/// Yaw grows as x shrinks and pitch grows as y grows. No smoothing is
/// applied.
#[derive(Debug, Clone)]
pub struct TouchController {
    settings: TouchSettings,
    angle: CameraAngle,
    last_point: Option<(f32, f32)>,
}

impl TouchController {
    pub fn new(settings: TouchSettings, initial: CameraAngle) -> Self {
        Self {
            settings,
            angle: CameraAngle::with_limit(initial.yaw, initial.pitch, settings.pitch_limit),
            last_point: None,
        }
    }

    pub fn angle(&self) -> CameraAngle {
        self.angle
    }

    pub fn is_dragging(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.last_point = Some((x, y));
    }

    /// Apply the movement since the previous point. Returns the new angle,
    /// or `None` if no drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) -> Option<CameraAngle> {
        let (last_x, last_y) = self.last_point?;
        let dx = x - last_x;
        let dy = y - last_y;
        self.last_point = Some((x, y));

        self.angle = CameraAngle {
            yaw: wrap_angle(self.angle.yaw - dx * self.settings.yaw_per_pixel),
            pitch: clamp_pitch(
                self.angle.pitch + dy * self.settings.pitch_per_pixel,
                self.settings.pitch_limit,
            ),
        };
        Some(self.angle)
    }

    pub fn end(&mut self) {
        self.last_point = None;
    }

    pub fn center(&mut self) -> CameraAngle {
        self.angle = CameraAngle::ZERO;
        self.angle
    }
}

impl Default for TouchController {
    fn default() -> Self {
        Self::new(TouchSettings::default(), CameraAngle::ZERO)
    }
}
