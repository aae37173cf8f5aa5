//! DecodeHidUseCase: turns `HID_REPORT` frame bodies into single-touch events.

use std::sync::Arc;

use ipts_core::{
    protocol::hid::{parse_hid_report, HidReport},
    DecodeError, FrameHeader, HidDecoder,
};
use tracing::trace;

use crate::application::sink::{InputSink, SinkError};

/// The Decode HID use case.
pub struct DecodeHidUseCase {
    sink: Arc<dyn InputSink>,
    touch_enabled: bool,
}

impl DecodeHidUseCase {
    /// Creates a new use case writing to `sink`.
    ///
    /// With `touch_enabled = false` reports are still parsed (so malformed
    /// ones are reported) but nothing is forwarded.
    pub fn new(sink: Arc<dyn InputSink>, touch_enabled: bool) -> Self {
        Self {
            sink,
            touch_enabled,
        }
    }
}

impl HidDecoder for DecodeHidUseCase {
    fn handle_input(&self, _header: &FrameHeader, body: &[u8]) -> Result<(), DecodeError> {
        match parse_hid_report(body)? {
            HidReport::SingleTouch(touch) if self.touch_enabled => self
                .sink
                .emit_single_touch(&touch)
                .map_err(SinkError::into_decode_error),
            HidReport::SingleTouch(_) => Ok(()),
            HidReport::Unsupported { report_id } => {
                trace!(report_id, "ignoring HID report");
                Ok(())
            }
        }
    }
}
