//! The fixed-size header at the start of every buffer read from the driver.
//!
//! Wire format (little-endian, imposed by the kernel driver):
//! ```text
//! [type:4][size:4][buffer:4][reserved:52][body:N]
//! ```
//! Total header size: 64 bytes.
//!
//! The header is decoded by copying the three fields out of the byte slice.
//! Nothing here casts the buffer to a struct, so a short or misaligned
//! buffer produces a [`HeaderError`] instead of undefined behaviour.

use thiserror::Error;

/// Total size of the frame header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Errors that can occur while decoding a frame header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// The buffer is shorter than [`HEADER_SIZE`].
    #[error("insufficient data for frame header: need {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },
}

// ── Frame kinds ───────────────────────────────────────────────────────────────

/// Frame kinds the driver is known to send.
///
/// Only [`FrameKind::Payload`] and [`FrameKind::HidReport`] have decoders.
/// Values outside this set are legal on the wire and are kept as the raw
/// `u32` in [`FrameHeader::raw_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FrameKind {
    Payload = 0x0,
    Error = 0x1,
    VendorData = 0x2,
    HidReport = 0x3,
    GetFeatures = 0x4,
}

impl TryFrom<u32> for FrameKind {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, ()> {
        match value {
            0x0 => Ok(FrameKind::Payload),
            0x1 => Ok(FrameKind::Error),
            0x2 => Ok(FrameKind::VendorData),
            0x3 => Ok(FrameKind::HidReport),
            0x4 => Ok(FrameKind::GetFeatures),
            _ => Err(()),
        }
    }
}

// ── Frame header ──────────────────────────────────────────────────────────────

/// Decoded copy of the 64-byte header.
///
/// Lives only for the duration of one dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// The `type` tag exactly as it appeared on the wire.
    pub raw_type: u32,
    /// Body size as declared by the driver.
    pub size: u32,
    /// Index of the driver buffer this frame was read from.
    pub buffer: u32,
}

impl FrameHeader {
    /// Decodes the header from the first [`HEADER_SIZE`] bytes of `bytes`.
    ///
    /// Bytes past the header are not looked at.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::InsufficientData`] if `bytes` is shorter than
    /// the header.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ipts_core::protocol::header::{FrameHeader, FrameKind, HEADER_SIZE};
    ///
    /// let mut buf = vec![0u8; HEADER_SIZE];
    /// buf[0] = 0x03;
    /// let header = FrameHeader::parse(&buf).unwrap();
    /// assert_eq!(header.kind(), Some(FrameKind::HidReport));
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_SIZE {
            return Err(HeaderError::InsufficientData {
                needed: HEADER_SIZE,
                available: bytes.len(),
            });
        }

        // bytes[12..64] are reserved – ignored on decode
        Ok(Self {
            raw_type: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            size: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            buffer: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }

    /// Returns the recognized frame kind, or `None` for an unrecognized tag.
    pub fn kind(&self) -> Option<FrameKind> {
        FrameKind::try_from(self.raw_type).ok()
    }

    /// Serializes the header back to its 64-byte wire form.
    ///
    /// Reserved bytes are written as zero.  Used by tests, benchmarks, and
    /// tools that synthesize driver buffers.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.raw_type.to_le_bytes());
        out[4..8].copy_from_slice(&self.size.to_le_bytes());
        out[8..12].copy_from_slice(&self.buffer.to_le_bytes());
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
