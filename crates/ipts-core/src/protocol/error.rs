//! Errors reported by frame decoders.
//!
//! Every failure carries a negative errno-style status code (see
//! [`DecodeError::code`]) so that the ingestion loop can log
//! `"Failed to parse data"` together with a number operators can grep for.

use thiserror::Error;

use crate::protocol::header::HeaderError;

/// `EIO` – output device or sink failure.
pub const EIO: i32 = 5;
/// `EINVAL` – malformed frame body.
pub const EINVAL: i32 = 22;

/// Errors that a decoder (or the header decode step) can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer did not even contain a full frame header.
    #[error("invalid frame header: {0}")]
    Header(#[from] HeaderError),

    /// A length field points past the end of the data that is available.
    #[error("truncated {context}: need {needed} bytes, got {available}")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    /// A heatmap report arrived before any heatmap dimensions report.
    #[error("heatmap data without preceding dimensions")]
    MissingHeatmapDimensions,

    /// The decoded event could not be delivered downstream.
    #[error("output failed: {0}")]
    Output(String),

    /// A decoder reported a raw status code with no richer description.
    #[error("decoder returned status {0}")]
    Status(i32),
}

impl DecodeError {
    /// Returns the negative status code logged alongside this error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ipts_core::DecodeError;
    ///
    /// assert_eq!(DecodeError::Status(-5).code(), -5);
    /// assert_eq!(DecodeError::MissingHeatmapDimensions.code(), -22);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            DecodeError::Header(_)
            | DecodeError::Truncated { .. }
            | DecodeError::MissingHeatmapDimensions => -EINVAL,
            DecodeError::Output(_) => -EIO,
            DecodeError::Status(code) => *code,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_body_errors_map_to_einval() {
        let truncated = DecodeError::Truncated {
            context: "payload header",
            needed: 12,
            available: 4,
        };
        assert_eq!(truncated.code(), -22);
        assert_eq!(DecodeError::MissingHeatmapDimensions.code(), -22);
    }

    #[test]
    fn test_header_error_converts_and_maps_to_einval() {
        let err: DecodeError = HeaderError::InsufficientData {
            needed: 64,
            available: 0,
        }
        .into();
        assert!(matches!(err, DecodeError::Header(_)));
        assert_eq!(err.code(), -EINVAL);
    }

    #[test]
    fn test_output_error_maps_to_eio() {
        assert_eq!(DecodeError::Output("device gone".into()).code(), -EIO);
    }

    #[test]
    fn test_status_code_is_passed_through_unchanged() {
        assert_eq!(DecodeError::Status(-71).code(), -71);
    }

    #[test]
    fn test_display_includes_context() {
        let err = DecodeError::Truncated {
            context: "stylus report",
            needed: 24,
            available: 8,
        };
        assert_eq!(
            err.to_string(),
            "truncated stylus report: need 24 bytes, got 8"
        );
    }
}
