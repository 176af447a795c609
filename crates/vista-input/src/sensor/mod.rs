//! Sensor producers and their lifecycle.
//!
//! A [`SensorProvider`] hands out [`SensorSubscription`]s. Dropping a
//! subscription deregisters the listener, so whoever owns the subscription
//! owns the producer. [`SensorMode`] tracks which subscription (if any) is
//! live for the sensor path.

mod replay;

use std::fmt;
use std::sync::mpsc::{Receiver, TryRecvError};

use vista_common::{OrientationSample, SensorError};

pub use replay::ReplaySensors;

/// Which physical sensor a subscription reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Absolute device orientation (alpha, beta, gamma in radians).
    Orientation,
    /// Angular rate (rad/s around device Z, X, Y).
    Rate,
}

/// A live listener registration.
pub struct SensorSubscription {
    kind: SensorKind,
    samples: Receiver<OrientationSample>,
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl SensorSubscription {
    pub fn new(kind: SensorKind, samples: Receiver<OrientationSample>) -> Self {
        Self {
            kind,
            samples,
            on_drop: None,
        }
    }

    /// Run `f` when the subscription is dropped (listener deregistration).
    pub fn on_drop(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Everything queued since the last drain. Never blocks.
    pub fn drain(&self) -> Vec<OrientationSample> {
        let mut out = Vec::new();
        loop {
            match self.samples.try_recv() {
                Ok(sample) => out.push(sample),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl fmt::Debug for SensorSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorSubscription")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        if let Some(f) = self.on_drop.take() {
            f();
        }
        tracing::debug!(kind = ?self.kind, "Sensor listener deregistered");
    }
}

/// Platform source of motion samples.
pub trait SensorProvider: Send {
    /// Absolute orientation sensor.
    fn start_primary(&mut self) -> Result<SensorSubscription, SensorError>;

    /// Angular-rate sensor used when the primary one is missing or refused.
    fn start_rate(&mut self) -> Result<SensorSubscription, SensorError>;
}

/// Provider for hosts without motion hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSensors;

impl SensorProvider for NoSensors {
    fn start_primary(&mut self) -> Result<SensorSubscription, SensorError> {
        Err(SensorError::Unavailable("no orientation sensor on this host".into()))
    }

    fn start_rate(&mut self) -> Result<SensorSubscription, SensorError> {
        Err(SensorError::Unavailable("no rate sensor on this host".into()))
    }
}

/// Which producer feeds the sensor path.
#[derive(Debug, Default)]
pub enum SensorMode {
    #[default]
    Inactive,
    Primary(SensorSubscription),
    Fallback(SensorSubscription),
}

impl SensorMode {
    /// Try the primary sensor, then the rate sensor.
    ///
    /// With `prefer_rate` the primary sensor is skipped. Failures are logged
    /// and never surfaced; if both fail the mode stays `Inactive`.
    pub fn activate(provider: &mut dyn SensorProvider, prefer_rate: bool) -> Self {
        if !prefer_rate {
            match provider.start_primary() {
                Ok(sub) => {
                    tracing::info!("Orientation sensor active");
                    return SensorMode::Primary(sub);
                }
                Err(e) => tracing::warn!("Orientation sensor unavailable: {e}"),
            }
        }

        match provider.start_rate() {
            Ok(sub) => {
                tracing::info!("Rate sensor active (fallback integration)");
                SensorMode::Fallback(sub)
            }
            Err(e) => {
                tracing::warn!("Rate sensor unavailable: {e}; camera stays put");
                SensorMode::Inactive
            }
        }
    }

    /// Drop the live subscription, if any. Safe to call repeatedly.
    pub fn deactivate(&mut self) {
        *self = SensorMode::Inactive;
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, SensorMode::Inactive)
    }

    pub fn kind(&self) -> Option<SensorKind> {
        self.subscription().map(SensorSubscription::kind)
    }

    pub fn subscription(&self) -> Option<&SensorSubscription> {
        match self {
            SensorMode::Inactive => None,
            SensorMode::Primary(sub) | SensorMode::Fallback(sub) => Some(sub),
        }
    }
}
