//! Ingestion loop: pulls raw driver buffers from a [`ReportSource`] and hands
//! each one to the [`ProtocolDispatcher`].
//!
//! # Containment (for beginners)
//!
//! A malformed buffer must never take the daemon down.  `process` logs the
//! failure (`"Failed to parse data"` plus the negative status code), bumps a
//! counter, and returns.  The next buffer is decoded as if nothing happened.
//! Only transport failures (the device itself going away) end [`IngestionLoop::run`].
//!
//! # Shutdown
//!
//! `run` checks a shared `AtomicBool` before every read, the same flag the
//! Ctrl-C handler in `main` clears.  Sources return [`ReadOutcome::Idle`]
//! regularly so the flag is observed even when the digitizer is silent.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use ipts_core::{Dispatched, ProtocolDispatcher};
use thiserror::Error;
use tracing::{debug, error, info, trace};

// ── Transport ─────────────────────────────────────────────────────────────────

/// Errors raised by a report source.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("frame of {size} bytes exceeds buffer of {max} bytes")]
    FrameTooLarge { size: usize, max: usize },
}

/// Result of one read from a report source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// `n` bytes of a complete driver buffer were written to the front of
    /// the caller's slice.
    Report(usize),
    /// Nothing to read right now.
    Idle,
    /// The source is exhausted and will never yield again.
    Closed,
}

/// A producer of raw driver buffers.
#[async_trait]
pub trait ReportSource: Send {
    /// Reads the next driver buffer into `buf`.
    async fn next_report(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, TransportError>;
}

// ── Loop ──────────────────────────────────────────────────────────────────────

/// Counters kept by the ingestion loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Buffers handed to the dispatcher.
    pub reports: u64,
    /// Buffers routed to a decoder that reported success.
    pub decoded: u64,
    /// Buffers whose frame type has no decoder.
    pub ignored: u64,
    /// Buffers whose decode failed.
    pub failed: u64,
    /// Subset of `ignored` whose type tag is not a known frame kind at all.
    pub unknown_kinds: u64,
}

/// Drives a [`ReportSource`] through a [`ProtocolDispatcher`].
pub struct IngestionLoop {
    dispatcher: ProtocolDispatcher,
    buffer_size: usize,
    stats: IngestStats,
}

impl IngestionLoop {
    pub fn new(dispatcher: ProtocolDispatcher, buffer_size: usize) -> Self {
        Self {
            dispatcher,
            buffer_size,
            stats: IngestStats::default(),
        }
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Dispatches one complete driver buffer and updates the counters.
    ///
    /// Returns the dispatcher's result unchanged so callers can inspect it;
    /// the loop itself only logs it.
    pub fn process(&mut self, buffer: &[u8]) -> Result<Dispatched, ipts_core::DecodeError> {
        self.stats.reports += 1;
        let result = self.dispatcher.handle_input(buffer);
        match &result {
            Ok(ignored @ Dispatched::Ignored { raw_type }) => {
                self.stats.ignored += 1;
                if ignored.is_unknown_kind() {
                    self.stats.unknown_kinds += 1;
                    trace!(raw_type, "ignoring buffer of unknown type");
                } else {
                    trace!(raw_type, "ignoring buffer without decoder");
                }
            }
            Ok(_) => self.stats.decoded += 1,
            Err(err) => {
                self.stats.failed += 1;
                error!(code = err.code(), "Failed to parse data: {err}");
            }
        }
        result
    }

    /// Reads and dispatches buffers until the source closes or `running`
    /// is cleared.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] raised by `source`.  Decode
    /// errors never end the loop.
    pub async fn run(
        &mut self,
        source: &mut dyn ReportSource,
        running: &AtomicBool,
    ) -> Result<IngestStats, TransportError> {
        let mut buf = vec![0u8; self.buffer_size];
        info!(buffer_size = self.buffer_size, "ingestion loop started");

        while running.load(Ordering::Relaxed) {
            match source.next_report(&mut buf).await? {
                ReadOutcome::Report(n) => {
                    let _ = self.process(&buf[..n]);
                }
                ReadOutcome::Idle => continue,
                ReadOutcome::Closed => {
                    debug!("report source closed");
                    break;
                }
            }
        }

        info!(
            reports = self.stats.reports,
            failed = self.stats.failed,
            "ingestion loop stopped"
        );
        Ok(self.stats)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::transport::mock::MockReportSource;
    use ipts_core::{DecodeError, FrameHeader, HidDecoder, PayloadDecoder};
    use std::sync::{Arc, Mutex};

    /// Fails whenever the body's first byte is 0xEE.
    #[derive(Default)]
    struct ByteDecoder {
        bodies: Mutex<Vec<Vec<u8>>>,
    }

    impl ByteDecoder {
        fn decode(&self, body: &[u8]) -> Result<(), DecodeError> {
            self.bodies.lock().unwrap().push(body.to_vec());
            match body.first() {
                Some(0xEE) => Err(DecodeError::Status(-22)),
                _ => Ok(()),
            }
        }
    }

    impl PayloadDecoder for ByteDecoder {
        fn handle_input(&self, _h: &FrameHeader, body: &[u8]) -> Result<(), DecodeError> {
            self.decode(body)
        }
    }

    impl HidDecoder for ByteDecoder {
        fn handle_input(&self, _h: &FrameHeader, body: &[u8]) -> Result<(), DecodeError> {
            self.decode(body)
        }
    }

    fn buffer(raw_type: u32, body: &[u8]) -> Vec<u8> {
        let mut buf = FrameHeader {
            raw_type,
            size: body.len() as u32,
            buffer: 0,
        }
        .to_bytes()
        .to_vec();
        buf.extend_from_slice(body);
        buf
    }

    fn ingestion() -> (IngestionLoop, Arc<ByteDecoder>) {
        let decoder = Arc::new(ByteDecoder::default());
        let dispatcher = ProtocolDispatcher::new(decoder.clone(), decoder.clone());
        (IngestionLoop::new(dispatcher, 4096), decoder)
    }

    #[test]
    fn test_process_counts_each_outcome() {
        let (mut ingest, _) = ingestion();

        ingest.process(&buffer(0, &[1])).unwrap();
        ingest.process(&buffer(3, &[2])).unwrap();
        ingest.process(&buffer(2, &[])).unwrap();
        ingest.process(&buffer(0x99, &[])).unwrap();
        let _ = ingest.process(&buffer(0, &[0xEE]));
        let _ = ingest.process(&[0u8; 10]);

        assert_eq!(
            ingest.stats(),
            IngestStats {
                reports: 6,
                decoded: 2,
                ignored: 2,
                failed: 2,
                unknown_kinds: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_run_continues_after_decode_failure() {
        // Arrange
        let (mut ingest, decoder) = ingestion();
        let mut source = MockReportSource::new(vec![
            buffer(0, &[0xEE]),
            buffer(0, &[0x01]),
            buffer(3, &[0x02]),
        ]);
        let running = AtomicBool::new(true);

        // Act
        let stats = ingest.run(&mut source, &running).await.unwrap();

        // Assert
        assert_eq!(stats.reports, 3);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.decoded, 2);
        assert_eq!(decoder.bodies.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_run_skips_idle_reads() {
        let (mut ingest, _) = ingestion();
        let mut source = MockReportSource::new(vec![buffer(0, &[1])]).with_idle_between();
        let running = AtomicBool::new(true);

        let stats = ingest.run(&mut source, &running).await.unwrap();

        assert_eq!(stats.reports, 1);
    }

    #[tokio::test]
    async fn test_run_stops_immediately_when_not_running() {
        let (mut ingest, decoder) = ingestion();
        let mut source = MockReportSource::new(vec![buffer(0, &[1])]);
        let running = AtomicBool::new(false);

        let stats = ingest.run(&mut source, &running).await.unwrap();

        assert_eq!(stats, IngestStats::default());
        assert!(decoder.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_propagates_transport_error() {
        let (mut ingest, _) = ingestion();
        let mut source = MockReportSource::new(vec![buffer(0, &[1])]).failing_after_queue();
        let running = AtomicBool::new(true);

        let err = ingest.run(&mut source, &running).await.unwrap_err();

        assert!(matches!(err, TransportError::Read(_)));
        assert_eq!(ingest.stats().reports, 1);
    }
}
