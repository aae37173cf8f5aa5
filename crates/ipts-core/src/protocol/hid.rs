//! Parser for the body of a `HID_REPORT` frame.
//!
//! The first byte is the HID report ID.  The only report this daemon decodes
//! is the single-touch report (`0x40`):
//! ```text
//! [report_id:1][touch:1][x:2][y:2]
//! ```
//! Other report IDs are passed through as [`HidReport::Unsupported`] so the
//! caller can ignore them without treating them as errors.

use crate::domain::SingleTouch;
use crate::protocol::bytes::{read_u16, read_u8};
use crate::protocol::error::DecodeError;

/// Report ID of the single-touch HID report.
pub const SINGLETOUCH_REPORT_ID: u8 = 0x40;

/// Size of a single-touch report including the report ID byte.
pub const SINGLETOUCH_REPORT_SIZE: usize = 6;

/// A decoded HID report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidReport {
    SingleTouch(SingleTouch),
    /// A report ID this daemon has no decoder for.
    Unsupported { report_id: u8 },
}

/// Parses a `HID_REPORT` frame body.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] if `body` is empty or if a single-touch
/// report is shorter than [`SINGLETOUCH_REPORT_SIZE`].
pub fn parse_hid_report(body: &[u8]) -> Result<HidReport, DecodeError> {
    let report_id = read_u8(body, 0, "HID report id")?;
    if report_id != SINGLETOUCH_REPORT_ID {
        return Ok(HidReport::Unsupported { report_id });
    }

    let touching = read_u8(body, 1, "single-touch report")? != 0;
    let x = read_u16(body, 2, "single-touch report")?;
    let y = read_u16(body, 4, "single-touch report")?;
    Ok(HidReport::SingleTouch(SingleTouch { touching, x, y }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singletouch(touch: u8, x: u16, y: u16) -> Vec<u8> {
        let mut out = vec![SINGLETOUCH_REPORT_ID, touch];
        out.extend_from_slice(&x.to_le_bytes());
        out.extend_from_slice(&y.to_le_bytes());
        out
    }

    #[test]
    fn test_singletouch_report_decodes() {
        let result = parse_hid_report(&singletouch(1, 16000, 32767));
        assert_eq!(
            result,
            Ok(HidReport::SingleTouch(SingleTouch {
                touching: true,
                x: 16000,
                y: 32767
            }))
        );
    }

    #[test]
    fn test_singletouch_release_decodes_touching_false() {
        let Ok(HidReport::SingleTouch(touch)) = parse_hid_report(&singletouch(0, 1, 2)) else {
            panic!("expected single-touch report");
        };
        assert!(!touch.touching);
    }

    #[test]
    fn test_trailing_bytes_after_singletouch_are_ignored() {
        let mut body = singletouch(1, 5, 6);
        body.extend_from_slice(&[0xFF; 32]);
        assert!(matches!(parse_hid_report(&body), Ok(HidReport::SingleTouch(_))));
    }

    #[test]
    fn test_other_report_id_is_unsupported_not_error() {
        assert_eq!(
            parse_hid_report(&[0x01, 0xAA]),
            Ok(HidReport::Unsupported { report_id: 0x01 })
        );
    }

    #[test]
    fn test_empty_body_is_truncated() {
        assert!(matches!(
            parse_hid_report(&[]),
            Err(DecodeError::Truncated { context: "HID report id", .. })
        ));
    }

    #[test]
    fn test_short_singletouch_report_is_truncated() {
        let result = parse_hid_report(&[SINGLETOUCH_REPORT_ID, 1, 0x10]);
        assert!(matches!(
            result,
            Err(DecodeError::Truncated { context: "single-touch report", .. })
        ));
    }
}
