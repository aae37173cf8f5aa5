//! Protocol module containing the frame header, the dispatcher, and the
//! frame body parsers.

mod bytes;
pub mod dispatch;
pub mod error;
pub mod header;
pub mod hid;
pub mod payload;

pub use dispatch::{handle_input, Dispatched, HidDecoder, PayloadDecoder, ProtocolDispatcher};
pub use error::DecodeError;
pub use header::{FrameHeader, FrameKind, HeaderError, HEADER_SIZE};
pub use hid::{parse_hid_report, HidReport};
pub use payload::{parse_payload, PayloadData, PayloadEvent};
