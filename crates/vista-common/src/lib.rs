pub mod errors;
pub mod status;
pub mod types;

pub use errors::{AcquisitionError, ConfigError, SensorError, VistaError};
pub use status::ViewerStatus;
pub use types::{
    clamp_pitch, wrap_angle, CameraAngle, ImageReference, OrientationSample,
    ScreenOrientation, PITCH_LIMIT_RADIANS,
};

pub type Result<T> = std::result::Result<T, VistaError>;
