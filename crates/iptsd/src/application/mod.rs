//! Application layer use cases for the daemon.
//!
//! - **`sink`** – The [`sink::InputSink`] trait decoded events are written
//!   to.  Implementations live in the infrastructure layer.
//!
//! - **`decode_payload`** / **`decode_hid`** – Implement the core
//!   `PayloadDecoder` and `HidDecoder` traits: parse the frame body and
//!   forward the result to a sink.
//!
//! - **`ingest`** – The loop that pulls buffers from a
//!   [`ingest::ReportSource`], dispatches them, and keeps going when a frame
//!   fails to decode.

pub mod decode_hid;
pub mod decode_payload;
pub mod ingest;
pub mod sink;
