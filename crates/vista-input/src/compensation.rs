//! Screen-orientation compensation for device-frame sensor angles.
//!
//! Sensor axes are fixed to the device body, so when the screen rotates the
//! raw (alpha, beta, gamma) triple has to be un-rotated before it means
//! "where is the user looking".

use std::f32::consts::{FRAC_PI_2, PI};

use vista_common::{wrap_angle, OrientationSample, ScreenOrientation};

/// Map a raw sample to screen-frame `(yaw, pitch)`.
///
/// `orientation` should already be resolved; `Unknown` is treated as
/// portrait-up. Yaw is wrapped into `(-π, π]`; pitch is returned unclamped.
pub fn compensate(sample: &OrientationSample, orientation: ScreenOrientation) -> (f32, f32) {
    let OrientationSample {
        alpha: yaw,
        beta: pitch,
        gamma: roll,
        ..
    } = *sample;

    let (yaw, pitch) = match orientation {
        ScreenOrientation::LandscapeLeft => (yaw - FRAC_PI_2, roll),
        ScreenOrientation::LandscapeRight => (yaw + FRAC_PI_2, -roll),
        ScreenOrientation::PortraitDown => (yaw + PI, pitch),
        ScreenOrientation::PortraitUp | ScreenOrientation::Unknown => (yaw, -pitch),
    };

    (wrap_angle(yaw), pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIENTATIONS: [ScreenOrientation; 5] = [
        ScreenOrientation::PortraitUp,
        ScreenOrientation::PortraitDown,
        ScreenOrientation::LandscapeLeft,
        ScreenOrientation::LandscapeRight,
        ScreenOrientation::Unknown,
    ];

    fn sample(alpha: f32, beta: f32, gamma: f32) -> OrientationSample {
        OrientationSample::new(alpha, beta, gamma, 0.0)
    }

    #[test]
    fn portrait_up_negates_pitch() {
        let (yaw, pitch) = compensate(&sample(0.3, 0.2, 0.9), ScreenOrientation::PortraitUp);
        assert!((yaw - 0.3).abs() < 1e-6);
        assert!((pitch + 0.2).abs() < 1e-6);
    }

    #[test]
    fn portrait_down_turns_yaw_half_circle() {
        let (yaw, pitch) = compensate(&sample(0.0, 0.2, 0.9), ScreenOrientation::PortraitDown);
        assert!((yaw - PI).abs() < 1e-6);
        assert!((pitch - 0.2).abs() < 1e-6);
    }

    #[test]
    fn landscape_left_uses_roll_as_pitch() {
        let (yaw, pitch) = compensate(&sample(1.0, 0.2, 0.4), ScreenOrientation::LandscapeLeft);
        assert!((yaw - (1.0 - FRAC_PI_2)).abs() < 1e-6);
        assert!((pitch - 0.4).abs() < 1e-6);
    }

    #[test]
    fn landscape_right_negates_roll() {
        let (yaw, pitch) = compensate(&sample(1.0, 0.2, 0.4), ScreenOrientation::LandscapeRight);
        assert!((yaw - (1.0 + FRAC_PI_2)).abs() < 1e-6);
        assert!((pitch + 0.4).abs() < 1e-6);
    }

    #[test]
    fn compensated_yaw_is_always_wrapped() {
        let steps = [-12.0f32, -7.1, -PI, -1.0, 0.0, 1.5, PI, 4.0, 6.3, 12.6];
        for orientation in ORIENTATIONS {
            for &alpha in &steps {
                for &beta in &steps {
                    for &gamma in &steps {
                        let (yaw, _) = compensate(&sample(alpha, beta, gamma), orientation);
                        assert!(
                            yaw > -PI && yaw <= PI,
                            "{orientation:?} ({alpha}, {beta}, {gamma}) -> yaw {yaw}"
                        );
                    }
                }
            }
        }
    }
}
