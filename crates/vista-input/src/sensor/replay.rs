//! Recorded sensor traces played back as a [`SensorProvider`].
//!
//! Trace files are JSON lines, one sample per line:
//!
//! ```text
//! {"kind":"orientation","alpha":0.1,"beta":0.0,"gamma":0.0,"timestamp":0.016}
//! {"kind":"rate","alpha":0.5,"beta":0.0,"gamma":0.0,"timestamp":0.033}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use vista_common::{OrientationSample, SensorError};

use super::{SensorKind, SensorProvider, SensorSubscription};

/// Longest sleep between two replayed samples.
const MAX_GAP: Duration = Duration::from_secs(1);

/// Sleep between samples recorded at `prev` and `next` seconds.
///
/// Out-of-order, non-finite and oversized gaps are clamped to
/// `[0, MAX_GAP]`.
fn pacing_gap(prev: f64, next: f64) -> Duration {
    let gap = next - prev;
    if gap.is_nan() {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(gap.clamp(0.0, MAX_GAP.as_secs_f64()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RecordKind {
    Orientation,
    Rate,
}

#[derive(Debug, Deserialize)]
struct Record {
    kind: RecordKind,
    #[serde(flatten)]
    sample: OrientationSample,
}

#[derive(Debug, Clone, Default)]
pub struct ReplaySensors {
    orientation: Vec<OrientationSample>,
    rate: Vec<OrientationSample>,
    paced: bool,
}

impl ReplaySensors {
    pub fn load(path: &Path) -> Result<Self, SensorError> {
        let file = std::fs::File::open(path).map_err(|e| {
            SensorError::StartFailed(format!("cannot open {}: {e}", path.display()))
        })?;
        let replay = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            orientation = replay.orientation.len(),
            rate = replay.rate.len(),
            "Loaded sensor trace"
        );
        Ok(replay)
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, SensorError> {
        let mut replay = Self {
            paced: true,
            ..Self::default()
        };
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| SensorError::StartFailed(e.to_string()))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let record: Record = serde_json::from_str(line).map_err(|e| {
                SensorError::StartFailed(format!("trace line {}: {e}", idx + 1))
            })?;
            match record.kind {
                RecordKind::Orientation => replay.orientation.push(record.sample),
                RecordKind::Rate => replay.rate.push(record.sample),
            }
        }
        Ok(replay)
    }

    /// Emit samples as fast as possible instead of at recorded spacing.
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    fn start(
        &self,
        kind: SensorKind,
        samples: &[OrientationSample],
    ) -> Result<SensorSubscription, SensorError> {
        if samples.is_empty() {
            return Err(SensorError::Unavailable(format!(
                "trace has no {kind:?} samples"
            )));
        }

        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let samples = samples.to_vec();
        let paced = self.paced;

        std::thread::Builder::new()
            .name(format!("sensor-replay-{kind:?}").to_lowercase())
            .spawn(move || {
                let mut prev: Option<f64> = None;
                for sample in samples {
                    if thread_stop.load(Ordering::Acquire) {
                        break;
                    }
                    if paced {
                        if let Some(p) = prev {
                            std::thread::sleep(pacing_gap(p, sample.timestamp_secs));
                        }
                    }
                    prev = Some(sample.timestamp_secs);
                    if tx.send(sample).is_err() {
                        break;
                    }
                }
                tracing::debug!("Sensor replay finished");
            })
            .map_err(|e| SensorError::StartFailed(format!("replay thread: {e}")))?;

        Ok(SensorSubscription::new(kind, rx).on_drop(move || {
            stop.store(true, Ordering::Release);
        }))
    }
}

impl SensorProvider for ReplaySensors {
    fn start_primary(&mut self) -> Result<SensorSubscription, SensorError> {
        self.start(SensorKind::Orientation, &self.orientation)
    }

    fn start_rate(&mut self) -> Result<SensorSubscription, SensorError> {
        self.start(SensorKind::Rate, &self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Instant;

    const TRACE: &str = r#"
# recorded on a tablet
{"kind":"orientation","alpha":0.1,"beta":0.2,"gamma":0.0,"timestamp":0.0}
{"kind":"orientation","alpha":0.2,"beta":0.2,"gamma":0.0,"timestamp":0.016}

{"kind":"rate","alpha":1.0,"beta":0.0,"gamma":0.0,"timestamp":0.0}
"#;

    fn collect(sub: &SensorSubscription, expected: usize) -> Vec<OrientationSample> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while out.len() < expected && Instant::now() < deadline {
            out.extend(sub.drain());
            std::thread::sleep(Duration::from_millis(5));
        }
        out
    }

    #[test]
    fn parses_both_kinds() {
        let replay = ReplaySensors::from_reader(TRACE.as_bytes()).unwrap();
        assert_eq!(replay.orientation.len(), 2);
        assert_eq!(replay.rate.len(), 1);
        assert_eq!(replay.orientation[1].timestamp_secs, 0.016);
    }

    #[test]
    fn bad_line_reports_line_number() {
        let err = ReplaySensors::from_reader("\n{\"kind\":\"tilt\"}\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn primary_replays_orientation_samples() {
        let mut replay = ReplaySensors::from_reader(TRACE.as_bytes()).unwrap().unpaced();
        let sub = replay.start_primary().unwrap();
        assert_eq!(sub.kind(), SensorKind::Orientation);
        let samples = collect(&sub, 2);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].alpha, 0.1);
        assert_eq!(samples[1].alpha, 0.2);
    }

    #[test]
    fn missing_kind_is_unavailable() {
        let only_rate = r#"{"kind":"rate","alpha":1.0,"beta":0.0,"gamma":0.0,"timestamp":0.0}"#;
        let mut replay = ReplaySensors::from_reader(only_rate.as_bytes()).unwrap();
        assert!(matches!(
            replay.start_primary(),
            Err(SensorError::Unavailable(_))
        ));
        assert!(replay.start_rate().is_ok());
    }

    #[test]
    fn pacing_gap_is_clamped() {
        assert_eq!(pacing_gap(0.0, 0.25), Duration::from_millis(250));
        assert_eq!(pacing_gap(1.0, 0.5), Duration::ZERO);
        assert_eq!(pacing_gap(0.0, 1e300), MAX_GAP);
        assert_eq!(pacing_gap(-1e308, 1e308), MAX_GAP);
        assert_eq!(pacing_gap(0.0, f64::INFINITY), MAX_GAP);
        assert_eq!(pacing_gap(0.0, f64::NEG_INFINITY), Duration::ZERO);
        assert_eq!(pacing_gap(f64::NAN, 1.0), Duration::ZERO);
        assert_eq!(pacing_gap(f64::INFINITY, f64::INFINITY), Duration::ZERO);
    }

    #[test]
    fn huge_timestamp_gap_replays_without_panic() {
        let trace = r#"
{"kind":"orientation","alpha":0.1,"beta":0.0,"gamma":0.0,"timestamp":0.0}
{"kind":"orientation","alpha":0.2,"beta":0.0,"gamma":0.0,"timestamp":1e300}
"#;
        let mut replay = ReplaySensors::from_reader(trace.as_bytes()).unwrap();
        let sub = replay.start_primary().unwrap();
        let samples = collect(&sub, 2);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].alpha, 0.2);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRACE.as_bytes()).unwrap();
        let replay = ReplaySensors::load(file.path()).unwrap();
        assert_eq!(replay.orientation.len(), 2);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ReplaySensors::load(Path::new("/nonexistent/trace.jsonl")).unwrap_err();
        assert!(matches!(err, SensorError::StartFailed(_)));
    }
}
