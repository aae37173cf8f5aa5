//! # ipts-core
//!
//! Shared library for the IPTS ingestion daemon containing the frame header
//! model, the protocol dispatcher, and the parsers for the two frame bodies the
//! daemon understands (touch/stylus payloads and HID reports).
//!
//! It has zero dependencies on OS APIs, device nodes, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! Intel Precise Touch & Stylus (IPTS) digitizers do not speak plain HID.  The
//! kernel driver hands raw buffers to userspace, and every buffer starts with
//! a 64-byte header whose `type` field says what follows.  The daemon has to
//! look at that tag and hand the rest of the buffer to the right decoder.
//!
//! - **`protocol`** – How bytes arrive from the driver.  The [`FrameHeader`]
//!   is decoded from the start of each buffer, and the [`ProtocolDispatcher`]
//!   routes the frame body to a [`PayloadDecoder`] or a [`HidDecoder`].
//!   The `payload` and `hid` sub-modules parse those bodies into typed values.
//!
//! - **`domain`** – Plain data produced by the parsers: stylus samples,
//!   capacitive heatmaps, and single-touch contacts.

pub mod domain;
pub mod protocol;

pub use domain::{
    Heatmap, HeatmapDimensions, SingleTouch, StylusMode, StylusReport, StylusSample,
    SINGLETOUCH_MAX_VALUE,
};
pub use protocol::dispatch::{
    handle_input, Dispatched, HidDecoder, PayloadDecoder, ProtocolDispatcher,
};
pub use protocol::error::DecodeError;
pub use protocol::header::{FrameHeader, FrameKind, HeaderError, HEADER_SIZE};
