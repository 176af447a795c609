//! Single-writer / multi-reader camera angle cell.
//!
//! Both components are packed into one `AtomicU64`, so readers always see a
//! yaw and pitch that were published together.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use vista_common::CameraAngle;

/// The one handle allowed to publish camera angles. Not `Clone`.
#[derive(Debug)]
pub struct AngleWriter {
    cell: Arc<AtomicU64>,
}

/// Read-only snapshot handle; cheap to clone.
#[derive(Debug, Clone)]
pub struct AngleReader {
    cell: Arc<AtomicU64>,
}

/// Create a writer/reader pair seeded with `initial`.
pub fn shared_angle(initial: CameraAngle) -> (AngleWriter, AngleReader) {
    let cell = Arc::new(AtomicU64::new(initial.to_bits()));
    (
        AngleWriter {
            cell: Arc::clone(&cell),
        },
        AngleReader { cell },
    )
}

impl AngleWriter {
    pub fn publish(&self, angle: CameraAngle) {
        self.cell.store(angle.to_bits(), Ordering::Release);
    }

    pub fn current(&self) -> CameraAngle {
        CameraAngle::from_bits(self.cell.load(Ordering::Acquire))
    }

    pub fn reader(&self) -> AngleReader {
        AngleReader {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl AngleReader {
    pub fn current(&self) -> CameraAngle {
        CameraAngle::from_bits(self.cell.load(Ordering::Acquire))
    }
}
