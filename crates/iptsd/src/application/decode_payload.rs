//! DecodePayloadUseCase: turns `PAYLOAD` frame bodies into stylus and
//! heatmap events.
//!
//! Parsing is done by [`ipts_core::protocol::payload::parse_payload`]; this
//! use case decides which events the daemon cares about and forwards them
//! to the [`InputSink`].

use std::sync::Arc;

use ipts_core::{
    protocol::payload::{parse_payload, PayloadEvent},
    DecodeError, FrameHeader, PayloadDecoder,
};
use tracing::trace;

use crate::application::sink::{InputSink, SinkError};

/// Which event families are forwarded to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub stylus: bool,
    pub touch: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            stylus: true,
            touch: true,
        }
    }
}

/// The Decode Payload use case.
pub struct DecodePayloadUseCase {
    sink: Arc<dyn InputSink>,
    options: DecodeOptions,
}

impl DecodePayloadUseCase {
    /// Creates a new use case writing to `sink`.
    pub fn new(sink: Arc<dyn InputSink>, options: DecodeOptions) -> Self {
        Self { sink, options }
    }
}

impl PayloadDecoder for DecodePayloadUseCase {
    /// Parses the whole body first, then emits events in wire order.
    ///
    /// A malformed body emits nothing; a sink failure stops at the failing
    /// event.
    fn handle_input(&self, header: &FrameHeader, body: &[u8]) -> Result<(), DecodeError> {
        let payload = parse_payload(body)?;
        trace!(
            buffer = header.buffer,
            counter = payload.counter,
            events = payload.events.len(),
            "decoded payload"
        );

        for event in &payload.events {
            let result = match event {
                PayloadEvent::Stylus(report) if self.options.stylus => {
                    self.sink.emit_stylus(report)
                }
                PayloadEvent::Heatmap(heatmap) if self.options.touch => {
                    self.sink.emit_heatmap(heatmap)
                }
                _ => Ok(()),
            };
            result.map_err(SinkError::into_decode_error)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
