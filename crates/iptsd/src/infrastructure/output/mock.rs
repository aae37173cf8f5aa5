//! Recording output sink for tests.
//!
//! Every emitted event is pushed into a `Mutex<Vec<...>>` so assertions can
//! inspect exactly what the decoders produced and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let sink = Arc::new(RecordingSink::new());
//! let use_case = DecodeHidUseCase::new(sink.clone(), true);
//!
//! use_case.handle_input(&header, &body).unwrap();
//!
//! assert_eq!(sink.touches.lock().unwrap().len(), 1);
//! ```
//!
//! # `should_fail` flag
//!
//! A sink built with [`RecordingSink::failing`] rejects every event with
//! [`SinkError::Device`], which lets tests exercise the `-EIO` path.

use std::sync::Mutex;

use ipts_core::{Heatmap, SingleTouch, StylusReport};

use crate::application::sink::{InputSink, SinkError};

/// A sink that records all events instead of delivering them.
#[derive(Default)]
pub struct RecordingSink {
    pub stylus: Mutex<Vec<StylusReport>>,
    pub heatmaps: Mutex<Vec<Heatmap>>,
    pub touches: Mutex<Vec<SingleTouch>>,
    /// When `true`, every call returns an error and records nothing.
    pub should_fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Total number of events recorded across all kinds.
    pub fn event_count(&self) -> usize {
        lock_len(&self.stylus) + lock_len(&self.heatmaps) + lock_len(&self.touches)
    }

    fn check(&self) -> Result<(), SinkError> {
        if self.should_fail {
            Err(SinkError::Device("simulated output failure".to_string()))
        } else {
            Ok(())
        }
    }
}

fn lock_len<T>(v: &Mutex<Vec<T>>) -> usize {
    v.lock().map(|g| g.len()).unwrap_or(0)
}

fn push<T>(v: &Mutex<Vec<T>>, item: T) -> Result<(), SinkError> {
    v.lock().map_err(|_| SinkError::Closed)?.push(item);
    Ok(())
}

impl InputSink for RecordingSink {
    fn emit_stylus(&self, report: &StylusReport) -> Result<(), SinkError> {
        self.check()?;
        push(&self.stylus, report.clone())
    }

    fn emit_heatmap(&self, heatmap: &Heatmap) -> Result<(), SinkError> {
        self.check()?;
        push(&self.heatmaps, heatmap.clone())
    }

    fn emit_single_touch(&self, touch: &SingleTouch) -> Result<(), SinkError> {
        self.check()?;
        push(&self.touches, *touch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_touch_and_counts_events() {
        let sink = RecordingSink::new();
        let touch = SingleTouch {
            touching: false,
            x: 1,
            y: 2,
        };

        sink.emit_single_touch(&touch).unwrap();

        assert_eq!(sink.event_count(), 1);
        assert_eq!(sink.touches.lock().unwrap()[0], touch);
    }

    #[test]
    fn test_failing_sink_records_nothing() {
        let sink = RecordingSink::failing();
        let report = StylusReport {
            serial: 0,
            samples: Vec::new(),
        };

        assert!(matches!(
            sink.emit_stylus(&report),
            Err(SinkError::Device(_))
        ));
        assert_eq!(sink.event_count(), 0);
    }
}
