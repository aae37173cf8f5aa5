//! iptsd library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does iptsd do? (for beginners)
//!
//! Surface-class devices use an Intel Precise Touch & Stylus (IPTS)
//! digitizer.  The kernel driver does not turn its output into input events;
//! it exposes the raw buffers on a character device instead.  This daemon:
//!
//! 1. Reads one buffer at a time from the device node.
//! 2. Hands each buffer to the [`ipts_core::ProtocolDispatcher`], which looks
//!    at the frame header and picks the payload or HID decoder.
//! 3. Lets the decoders turn the frame body into stylus samples, heatmaps,
//!    and single-touch contacts, and forwards those to an output sink.
//! 4. Logs any frame that fails to decode and carries on with the next one.

/// Application layer: decoder use cases and the ingestion loop.
pub mod application;

/// Infrastructure layer: device transport, output sinks, and configuration.
pub mod infrastructure;
