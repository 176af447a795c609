use std::path::PathBuf;

/// Failure of a single texture acquisition strategy.
///
/// All variants are recovered inside the pipeline by falling through to the
/// next strategy; none of them reach the viewer shell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquisitionError {
    #[error("invalid image reference: {0}")]
    InvalidReference(String),

    #[error("{strategy} timed out after {after_ms} ms")]
    Timeout { strategy: &'static str, after_ms: u64 },

    #[error("acquisition failed: {0}")]
    Failure(String),
}

impl AcquisitionError {
    /// True for errors raised before any I/O was attempted.
    pub fn is_fast_fail(&self) -> bool {
        matches!(self, AcquisitionError::InvalidReference(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("sensor unavailable: {0}")]
    Unavailable(String),

    #[error("sensor failed to start: {0}")]
    StartFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum VistaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("renderer error: {0}")]
    Renderer(String),

    #[error("{0}")]
    Other(String),
}
