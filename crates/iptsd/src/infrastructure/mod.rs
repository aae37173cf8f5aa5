//! Infrastructure layer for the daemon.
//!
//! Contains the OS-facing adapters: reading driver buffers from the IPTS
//! device node, delivering decoded events, and loading the TOML config.
//!
//! **Dependency rule**: this layer may depend on `application` and `ipts_core`,
//! but MUST NOT be imported by the `application` or domain layers (test
//! modules excepted).
//!
//! # Sub-modules
//!
//! - **`transport`** – [`ReportSource`](crate::application::ingest::ReportSource)
//!   implementations: the live device node, a capture-file replay, and a
//!   queue-backed mock for tests.
//!
//! - **`output`** – [`InputSink`](crate::application::sink::InputSink)
//!   implementations: a sink that logs every event through `tracing`, and a
//!   recording mock for tests.
//!
//! - **`storage`** – TOML configuration loading and validation.

pub mod output;
pub mod storage;
pub mod transport;
