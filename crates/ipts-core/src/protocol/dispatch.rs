//! Protocol dispatcher: classifies a raw driver buffer and hands it to
//! exactly one decoder.
//!
//! # Containment contract
//!
//! The dispatcher never logs, never retries, and never panics on bad input.
//! A decoder failure comes back to the caller untouched so the ingestion loop
//! can log it and move on to the next buffer.  Frames whose `type` tag has no
//! decoder are a silent success: the hardware is allowed to send kinds this
//! daemon does not know about.
//!
//! # Why no shared context? (for beginners)
//!
//! The decoders are passed in as trait objects instead of being fetched from
//! a global daemon state.  This keeps the dispatcher a pure function of
//! `(buffer, decoders)`, which means tests can hand it mocks that count calls
//! and return whatever status the test needs.

use std::sync::Arc;

use crate::protocol::error::DecodeError;
use crate::protocol::header::{FrameHeader, FrameKind, HEADER_SIZE};

/// Decoder for [`FrameKind::Payload`] frames (touch heatmaps and stylus data).
#[cfg_attr(test, mockall::automock)]
pub trait PayloadDecoder: Send + Sync {
    /// Decodes one payload frame body.
    ///
    /// `body` is everything after the 64-byte header.
    fn handle_input(&self, header: &FrameHeader, body: &[u8]) -> Result<(), DecodeError>;
}

/// Decoder for [`FrameKind::HidReport`] frames.
#[cfg_attr(test, mockall::automock)]
pub trait HidDecoder: Send + Sync {
    /// Decodes one HID report frame body.
    ///
    /// `body` is everything after the 64-byte header.
    fn handle_input(&self, header: &FrameHeader, body: &[u8]) -> Result<(), DecodeError>;
}

/// What the dispatcher did with a buffer that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// The payload decoder accepted the frame.
    Payload,
    /// The HID decoder accepted the frame.
    HidReport,
    /// No decoder handles this frame kind; nothing was invoked.
    Ignored { raw_type: u32 },
}

impl Dispatched {
    /// Returns `true` if the frame kind was not in the recognized set at all
    /// (as opposed to a recognized kind without a decoder, like `ERROR`).
    pub fn is_unknown_kind(&self) -> bool {
        match self {
            Dispatched::Ignored { raw_type } => FrameKind::try_from(*raw_type).is_err(),
            _ => false,
        }
    }
}

/// Classifies `buffer` by its header tag and delegates to the owning decoder.
///
/// Returns `Ok` when the selected decoder succeeded or when no decoder matched,
/// and exactly the decoder's error when it failed.  `buffer` is only borrowed
/// for the duration of the call.
///
/// # Errors
///
/// Returns whatever [`DecodeError`] the delegated decoder reports, or
/// [`DecodeError::Header`] if `buffer` is shorter than [`HEADER_SIZE`]
/// (the transport normally rules that out before calling).
pub fn handle_input(
    buffer: &[u8],
    payload: &dyn PayloadDecoder,
    hid: &dyn HidDecoder,
) -> Result<Dispatched, DecodeError> {
    let header = FrameHeader::parse(buffer)?;
    let body = &buffer[HEADER_SIZE..];

    match header.kind() {
        Some(FrameKind::Payload) => payload
            .handle_input(&header, body)
            .map(|()| Dispatched::Payload),
        Some(FrameKind::HidReport) => hid
            .handle_input(&header, body)
            .map(|()| Dispatched::HidReport),
        _ => Ok(Dispatched::Ignored {
            raw_type: header.raw_type,
        }),
    }
}

/// Holds the two decoder handles so callers can dispatch buffers without
/// threading both through every call site.
///
/// Carries no mutable state; any number of threads may call
/// [`ProtocolDispatcher::handle_input`] at once.
#[derive(Clone)]
pub struct ProtocolDispatcher {
    payload: Arc<dyn PayloadDecoder>,
    hid: Arc<dyn HidDecoder>,
}

impl ProtocolDispatcher {
    /// Creates a dispatcher over the given decoders.
    pub fn new(payload: Arc<dyn PayloadDecoder>, hid: Arc<dyn HidDecoder>) -> Self {
        Self { payload, hid }
    }

    /// See the free function [`handle_input`].
    ///
    /// # Errors
    ///
    /// Returns the delegated decoder's [`DecodeError`] unchanged.
    pub fn handle_input(&self, buffer: &[u8]) -> Result<Dispatched, DecodeError> {
        handle_input(buffer, self.payload.as_ref(), self.hid.as_ref())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
