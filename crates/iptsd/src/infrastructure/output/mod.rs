//! Output sinks for decoded digitizer events.
//!
//! [`TracingSink`] is the sink the daemon runs with: it writes every event to
//! the log.  Feeding a virtual input device is left to a future sink behind
//! the same [`InputSink`] trait.

pub mod mock;

use ipts_core::{Heatmap, SingleTouch, StylusReport, SINGLETOUCH_MAX_VALUE};
use tracing::{debug, trace};

use crate::application::sink::{InputSink, SinkError};

/// Logs decoded events.
///
/// Stylus reports and single-touch updates go to `debug`; individual samples
/// and heatmaps go to `trace`, since they arrive at the digitizer's full rate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl InputSink for TracingSink {
    fn emit_stylus(&self, report: &StylusReport) -> Result<(), SinkError> {
        debug!(
            serial = report.serial,
            samples = report.samples.len(),
            "stylus report"
        );
        for sample in &report.samples {
            trace!(
                x = sample.x,
                y = sample.y,
                pressure = sample.pressure,
                proximity = sample.mode.proximity(),
                contact = sample.mode.contact(),
                button = sample.mode.button(),
                rubber = sample.mode.rubber(),
                "stylus sample"
            );
        }
        Ok(())
    }

    fn emit_heatmap(&self, heatmap: &Heatmap) -> Result<(), SinkError> {
        let dim = heatmap.dimensions;
        let peak = heatmap.data.iter().copied().max().unwrap_or(0);
        trace!(
            width = dim.width,
            height = dim.height,
            z_min = dim.z_min,
            z_max = dim.z_max,
            peak,
            "heatmap"
        );
        Ok(())
    }

    fn emit_single_touch(&self, touch: &SingleTouch) -> Result<(), SinkError> {
        // Relative position in [0, 1] so the log reads independent of panel size.
        let max = f32::from(SINGLETOUCH_MAX_VALUE);
        debug!(
            touching = touch.touching,
            x = f32::from(touch.x) / max,
            y = f32::from(touch.y) / max,
            "single touch"
        );
        Ok(())
    }
}
