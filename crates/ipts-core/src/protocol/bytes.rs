//! Bounds-checked little-endian readers shared by the body parsers.

use crate::protocol::error::DecodeError;

/// Returns `buf[offset..offset + len]`, or [`DecodeError::Truncated`] if that
/// range is not fully inside `buf`.
pub(crate) fn section<'a>(
    buf: &'a [u8],
    offset: usize,
    len: usize,
    context: &'static str,
) -> Result<&'a [u8], DecodeError> {
    match offset.checked_add(len) {
        Some(end) if end <= buf.len() => Ok(&buf[offset..end]),
        _ => Err(DecodeError::Truncated {
            context,
            needed: offset.saturating_add(len),
            available: buf.len(),
        }),
    }
}

pub(crate) fn read_u8(buf: &[u8], offset: usize, context: &'static str) -> Result<u8, DecodeError> {
    Ok(section(buf, offset, 1, context)?[0])
}

pub(crate) fn read_u16(buf: &[u8], offset: usize, context: &'static str) -> Result<u16, DecodeError> {
    let b = section(buf, offset, 2, context)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

pub(crate) fn read_u32(buf: &[u8], offset: usize, context: &'static str) -> Result<u32, DecodeError> {
    let b = section(buf, offset, 4, context)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}
