//! Camera input: sensor-driven orientation estimation and drag-to-look.
//!
//! Exactly one producer writes the shared [`CameraAngle`](vista_common::CameraAngle)
//! at a time. [`InputRouter`] owns the only [`AngleWriter`] and switches
//! between the sensor path and the touch path; the renderer holds an
//! [`AngleReader`] and samples it once per frame.

pub mod compensation;
pub mod estimator;
pub mod filter;
pub mod router;
pub mod sensor;
pub mod shared;
pub mod touch;

pub use estimator::{EstimatorSettings, OrientationEstimator};
pub use router::{InputMode, InputRouter};
pub use sensor::{NoSensors, ReplaySensors, SensorKind, SensorMode, SensorProvider, SensorSubscription};
pub use shared::{shared_angle, AngleReader, AngleWriter};
pub use touch::{TouchController, TouchSettings};
