//! Output side of the decoders.
//!
//! Decoders never talk to an output device directly; they hand every decoded
//! event to an [`InputSink`].  The infrastructure layer provides the concrete
//! sinks (a tracing sink for now, a recording sink for tests).

use ipts_core::{DecodeError, Heatmap, SingleTouch, StylusReport};
use thiserror::Error;

/// Error type for sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("output device error: {0}")]
    Device(String),
    #[error("output sink closed")]
    Closed,
}

impl SinkError {
    /// Wraps the sink failure as the decoder error the dispatcher forwards.
    pub fn into_decode_error(self) -> DecodeError {
        DecodeError::Output(self.to_string())
    }
}

/// Destination for decoded digitizer events.
pub trait InputSink: Send + Sync {
    /// Delivers all samples of one stylus report.
    fn emit_stylus(&self, report: &StylusReport) -> Result<(), SinkError>;

    /// Delivers one capacitive heatmap.
    fn emit_heatmap(&self, heatmap: &Heatmap) -> Result<(), SinkError>;

    /// Delivers one single-touch contact update.
    fn emit_single_touch(&self, touch: &SingleTouch) -> Result<(), SinkError>;
}
