//! Domain values produced by the frame body parsers.
//!
//! These are plain data: no I/O, no knowledge of where the bytes came from or
//! where the events go next.  The daemon's output sinks consume them.

pub mod heatmap;
pub mod stylus;
pub mod touch;

pub use heatmap::{Heatmap, HeatmapDimensions};
pub use stylus::{StylusMode, StylusReport, StylusSample};
pub use touch::{SingleTouch, SINGLETOUCH_MAX_VALUE};
