//! Owns the camera-angle writer and the one active input producer.

use vista_common::{CameraAngle, ScreenOrientation};
use vista_config::VistaConfig;

use crate::estimator::{EstimatorSettings, OrientationEstimator};
use crate::sensor::{SensorKind, SensorMode, SensorProvider};
use crate::shared::{shared_angle, AngleReader, AngleWriter};
use crate::touch::{TouchController, TouchSettings};

/// The active producer. Exactly one exists at a time.
#[derive(Debug)]
pub enum InputMode {
    Sensor {
        estimator: OrientationEstimator,
        sensors: SensorMode,
    },
    Touch(TouchController),
}

impl InputMode {
    pub fn is_sensor(&self) -> bool {
        matches!(self, InputMode::Sensor { .. })
    }
}

pub struct InputRouter {
    writer: AngleWriter,
    provider: Box<dyn SensorProvider>,
    mode: InputMode,
    estimator_settings: EstimatorSettings,
    touch_settings: TouchSettings,
    prefer_rate: bool,
    screen: ScreenOrientation,
    viewport: (u32, u32),
    disposed: bool,
}

impl InputRouter {
    pub fn new(
        config: &VistaConfig,
        provider: Box<dyn SensorProvider>,
        use_gyro: bool,
        initial: CameraAngle,
    ) -> Self {
        let estimator_settings = EstimatorSettings::from(&config.orientation);
        let initial = CameraAngle::with_limit(
            initial.yaw,
            initial.pitch,
            estimator_settings.pitch_limit,
        );
        let (writer, _) = shared_angle(initial);

        let mut router = Self {
            writer,
            provider,
            // Placeholder until the real producer is activated below.
            mode: InputMode::Touch(TouchController::default()),
            estimator_settings,
            touch_settings: TouchSettings::from_config(&config.touch, &config.orientation),
            prefer_rate: config.orientation.prefer_rate_sensor,
            screen: ScreenOrientation::Unknown,
            viewport: (1, 1),
            disposed: false,
        };
        router.mode = router.build_mode(use_gyro, initial);
        router
    }

    /// Handle for the render loop.
    pub fn reader(&self) -> AngleReader {
        self.writer.reader()
    }

    pub fn angle(&self) -> CameraAngle {
        self.writer.current()
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn use_gyro(&self) -> bool {
        self.mode.is_sensor()
    }

    /// Whether a sensor listener is currently delivering samples.
    pub fn sensor_active(&self) -> bool {
        match &self.mode {
            InputMode::Sensor { sensors, .. } => sensors.is_active(),
            InputMode::Touch(_) => false,
        }
    }

    /// Switch between sensor and touch control.
    ///
    /// The old producer is torn down before the new one starts. The camera
    /// keeps its current angle across the switch.
    pub fn set_use_gyro(&mut self, use_gyro: bool) {
        if self.disposed || use_gyro == self.use_gyro() {
            return;
        }
        if let InputMode::Sensor { sensors, .. } = &mut self.mode {
            sensors.deactivate();
        }
        let current = self.writer.current();
        self.mode = self.build_mode(use_gyro, current);
        tracing::info!(use_gyro, "Input mode switched");
    }

    pub fn set_screen_orientation(&mut self, screen: ScreenOrientation) {
        self.screen = screen;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        if let InputMode::Sensor { estimator, .. } = &mut self.mode {
            estimator.set_viewport(width, height);
        }
    }

    /// Drain pending sensor samples and publish the resulting angle.
    ///
    /// Called once per frame; a no-op in touch mode.
    pub fn poll(&mut self) -> CameraAngle {
        if let InputMode::Sensor { estimator, sensors } = &mut self.mode {
            if let Some(sub) = sensors.subscription() {
                let samples = sub.drain();
                if !samples.is_empty() {
                    let kind = sub.kind();
                    let mut angle = estimator.angle();
                    for sample in &samples {
                        angle = match kind {
                            SensorKind::Orientation => estimator.on_sample(sample, self.screen),
                            SensorKind::Rate => estimator.on_rate_sample(sample),
                        };
                    }
                    self.writer.publish(angle);
                }
            }
        }
        self.writer.current()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if let InputMode::Touch(touch) = &mut self.mode {
            touch.begin(x, y);
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let InputMode::Touch(touch) = &mut self.mode {
            if let Some(angle) = touch.drag_to(x, y) {
                self.writer.publish(angle);
            }
        }
    }

    pub fn pointer_up(&mut self) {
        if let InputMode::Touch(touch) = &mut self.mode {
            touch.end();
        }
    }

    /// Look straight ahead.
    ///
    /// In sensor mode the next sample also becomes the new reference pose,
    /// so the view stays centered instead of drifting back.
    pub fn center(&mut self) {
        let angle = match &mut self.mode {
            InputMode::Sensor { estimator, .. } => {
                estimator.recalibrate();
                estimator.center()
            }
            InputMode::Touch(touch) => touch.center(),
        };
        self.writer.publish(angle);
    }

    /// Re-latch the sensor reference pose without resetting the filter.
    pub fn recalibrate(&mut self) {
        if let InputMode::Sensor { estimator, .. } = &mut self.mode {
            estimator.recalibrate();
        }
    }

    /// Deregister any sensor listener. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if let InputMode::Sensor { sensors, .. } = &mut self.mode {
            sensors.deactivate();
        }
        if !self.disposed {
            tracing::debug!("Input router disposed");
        }
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn build_mode(&mut self, use_gyro: bool, from: CameraAngle) -> InputMode {
        if use_gyro {
            let mut estimator = OrientationEstimator::new(self.estimator_settings).with_initial(from);
            estimator.set_viewport(self.viewport.0, self.viewport.1);
            let sensors = SensorMode::activate(self.provider.as_mut(), self.prefer_rate);
            InputMode::Sensor { estimator, sensors }
        } else {
            InputMode::Touch(TouchController::new(self.touch_settings, from))
        }
    }
}

impl Drop for InputRouter {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::tests::CountingSensors;
    use crate::sensor::NoSensors;
    use std::sync::atomic::Ordering;
    use vista_common::OrientationSample;

    fn router_with(sensors: &CountingSensors, use_gyro: bool) -> InputRouter {
        InputRouter::new(
            &VistaConfig::default(),
            Box::new(sensors.clone()),
            use_gyro,
            CameraAngle::ZERO,
        )
    }

    #[test]
    fn gyro_toggle_registers_exactly_once_each() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, true);
        assert_eq!(sensors.starts.load(Ordering::SeqCst), 1);

        router.set_use_gyro(false);
        assert_eq!(sensors.stops.load(Ordering::SeqCst), 1);
        assert_eq!(sensors.active(), 0);

        router.set_use_gyro(true);
        assert_eq!(sensors.starts.load(Ordering::SeqCst), 2);
        assert_eq!(sensors.stops.load(Ordering::SeqCst), 1);
        assert_eq!(sensors.active(), 1);
    }

    #[test]
    fn setting_same_mode_is_noop() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, true);
        router.set_use_gyro(true);
        router.set_use_gyro(true);
        assert_eq!(sensors.starts.load(Ordering::SeqCst), 1);
        assert_eq!(sensors.active(), 1);
    }

    #[test]
    fn drag_updates_shared_angle_in_touch_mode() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, false);
        let reader = router.reader();
        router.pointer_down(100.0, 100.0);
        router.pointer_move(80.0, 130.0);
        router.pointer_up();
        let angle = reader.current();
        assert!((angle.yaw - 0.1).abs() < 1e-6);
        assert!((angle.pitch - 0.09).abs() < 1e-6);
        assert_eq!(sensors.starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn pointer_ignored_in_sensor_mode() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, true);
        router.pointer_down(100.0, 100.0);
        router.pointer_move(0.0, 0.0);
        assert_eq!(router.angle(), CameraAngle::ZERO);
    }

    #[test]
    fn poll_publishes_sensor_samples() {
        let sensors = CountingSensors::new(true, true);
        let mut router = InputRouter::new(
            &VistaConfig::default(),
            Box::new(sensors.clone()),
            true,
            CameraAngle::ZERO,
        );
        router.set_screen_orientation(ScreenOrientation::PortraitUp);
        let reader = router.reader();
        sensors.push(OrientationSample::new(0.0, 0.0, 0.0, 0.0));
        for i in 1..=120 {
            sensors.push(OrientationSample::new(0.6, 0.0, 0.0, i as f64 / 60.0));
        }
        router.poll();
        assert!((reader.current().yaw - 0.6).abs() < 1e-3);
    }

    #[test]
    fn rate_fallback_integrates() {
        let sensors = CountingSensors::new(false, true);
        let mut router = router_with(&sensors, true);
        assert!(router.sensor_active());
        sensors.push(OrientationSample::new(0.0, 0.0, 0.0, 0.0));
        sensors.push(OrientationSample::new(1.0, 0.0, 0.0, 0.5));
        let angle = router.poll();
        assert!((angle.yaw - 0.5).abs() < 1e-6);
    }

    #[test]
    fn missing_sensors_leave_camera_still() {
        let mut router = InputRouter::new(
            &VistaConfig::default(),
            Box::new(NoSensors),
            true,
            CameraAngle::new(0.4, 0.1),
        );
        assert!(router.use_gyro());
        assert!(!router.sensor_active());
        let angle = router.poll();
        assert!((angle.yaw - 0.4).abs() < 1e-6);
        assert!((angle.pitch - 0.1).abs() < 1e-6);
    }

    #[test]
    fn center_is_idempotent_in_both_modes() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, false);
        router.pointer_down(0.0, 0.0);
        router.pointer_move(-50.0, 40.0);
        router.center();
        router.center();
        assert_eq!(router.angle(), CameraAngle::ZERO);

        router.set_use_gyro(true);
        sensors.push(OrientationSample::new(0.0, 0.0, 0.0, 0.0));
        sensors.push(OrientationSample::new(1.0, 0.3, 0.0, 1.0));
        router.poll();
        router.center();
        assert_eq!(router.angle(), CameraAngle::ZERO);
    }

    #[test]
    fn switching_modes_keeps_angle() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, false);
        router.pointer_down(0.0, 0.0);
        router.pointer_move(-20.0, 0.0);
        router.set_use_gyro(true);
        // First sample latches calibration; the bias keeps the view in place.
        sensors.push(OrientationSample::new(2.0, 0.5, 0.0, 0.0));
        let angle = router.poll();
        assert!((angle.yaw - 0.1).abs() < 1e-6);
    }

    #[test]
    fn dispose_is_idempotent() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, true);
        router.dispose();
        router.dispose();
        assert!(router.is_disposed());
        assert_eq!(sensors.stops.load(Ordering::SeqCst), 1);
        drop(router);
        assert_eq!(sensors.stops.load(Ordering::SeqCst), 1);
        assert_eq!(sensors.active(), 0);
    }

    #[test]
    fn no_toggle_after_dispose() {
        let sensors = CountingSensors::new(true, true);
        let mut router = router_with(&sensors, false);
        router.dispose();
        router.set_use_gyro(true);
        assert_eq!(sensors.starts.load(Ordering::SeqCst), 0);
    }
}
