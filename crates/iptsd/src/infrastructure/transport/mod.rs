//! Report sources: where raw driver buffers come from.
//!
//! # How the IPTS device node behaves (for beginners)
//!
//! The kernel driver exposes each digitizer buffer as a character device.
//! One `read` returns one complete driver buffer: the 64-byte frame header
//! followed by its body.  When the digitizer is idle a read may return zero
//! bytes, in which case the daemon sleeps for `poll_interval_ms` and tries
//! again rather than spinning.
//!
//! For offline debugging the same bytes can be captured into a regular file
//! and replayed with [`replay::ReplayReportSource`]; [`open_report_source`]
//! picks the right source from the configured path.

pub mod mock;
pub mod replay;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use ipts_core::HEADER_SIZE;
use tokio::{fs::File, io::AsyncReadExt, time};
use tracing::{info, warn};

use crate::application::ingest::{ReadOutcome, ReportSource, TransportError};
use crate::infrastructure::storage::config::DeviceConfig;
use replay::ReplayReportSource;

/// Reads driver buffers from a live IPTS device node.
pub struct DeviceReportSource {
    file: File,
    path: PathBuf,
    poll_interval: Duration,
}

impl DeviceReportSource {
    /// Opens the device node at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] if the node cannot be opened.
    pub async fn open(path: &Path, poll_interval: Duration) -> Result<Self, TransportError> {
        let file = File::open(path).await.map_err(|source| TransportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            poll_interval,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportSource for DeviceReportSource {
    async fn next_report(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, TransportError> {
        match self.file.read(buf).await {
            Ok(0) => {
                time::sleep(self.poll_interval).await;
                Ok(ReadOutcome::Idle)
            }
            Ok(n) if n < HEADER_SIZE => {
                warn!(
                    read = n,
                    needed = HEADER_SIZE,
                    "dropping short read from {}",
                    self.path.display()
                );
                Ok(ReadOutcome::Idle)
            }
            Ok(n) => Ok(ReadOutcome::Report(n)),
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                time::sleep(self.poll_interval).await;
                Ok(ReadOutcome::Idle)
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => Ok(ReadOutcome::Idle),
            Err(e) => Err(TransportError::Read(e)),
        }
    }
}

/// Opens the source described by `config`.
///
/// A regular file is replayed as a capture; anything else (normally a
/// character device) is read live.
///
/// # Errors
///
/// Returns [`TransportError::Open`] if the path cannot be inspected or opened.
pub async fn open_report_source(
    config: &DeviceConfig,
) -> Result<Box<dyn ReportSource>, TransportError> {
    let path = config.path.as_path();
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| TransportError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    if metadata.is_file() {
        info!("replaying capture file {}", path.display());
        Ok(Box::new(ReplayReportSource::open(path).await?))
    } else {
        info!("reading from device {}", path.display());
        Ok(Box::new(
            DeviceReportSource::open(path, config.poll_interval()).await?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipts_core::FrameHeader;

    fn temp_file(name: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "iptsd_transport_{}_{name}.bin",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_open_missing_path_is_open_error() {
        let config = DeviceConfig {
            path: PathBuf::from("/nonexistent/ipts/device"),
            ..DeviceConfig::default()
        };

        let result = open_report_source(&config).await;

        assert!(matches!(result, Err(TransportError::Open { .. })));
    }

    #[tokio::test]
    async fn test_regular_file_is_replayed() {
        // Arrange
        let mut capture = FrameHeader {
            raw_type: 3,
            size: 2,
            buffer: 0,
        }
        .to_bytes()
        .to_vec();
        capture.extend_from_slice(&[0x40, 0x01]);
        let path = temp_file("replayed", &capture);
        let config = DeviceConfig {
            path: path.clone(),
            ..DeviceConfig::default()
        };

        // Act
        let mut source = open_report_source(&config).await.unwrap();
        let mut buf = vec![0u8; 256];
        let first = source.next_report(&mut buf).await.unwrap();
        let second = source.next_report(&mut buf).await.unwrap();

        // Assert
        assert_eq!(first, ReadOutcome::Report(HEADER_SIZE + 2));
        assert_eq!(second, ReadOutcome::Closed);
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_device_source_short_read_is_dropped() {
        let path = temp_file("short", &[0u8; 10]);
        let mut source = DeviceReportSource::open(&path, Duration::from_millis(1))
            .await
            .unwrap();
        let mut buf = vec![0u8; 256];

        let first = source.next_report(&mut buf).await.unwrap();
        let second = source.next_report(&mut buf).await.unwrap();

        assert_eq!(first, ReadOutcome::Idle);
        // End of a regular file reads zero bytes, which is also idle.
        assert_eq!(second, ReadOutcome::Idle);
        assert_eq!(source.path(), path.as_path());
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_device_source_full_read_is_report() {
        let path = temp_file("full", &[0u8; HEADER_SIZE + 4]);
        let mut source = DeviceReportSource::open(&path, Duration::from_millis(1))
            .await
            .unwrap();
        let mut buf = vec![0u8; 256];

        let outcome = source.next_report(&mut buf).await.unwrap();

        assert_eq!(outcome, ReadOutcome::Report(HEADER_SIZE + 4));
        std::fs::remove_file(&path).ok();
    }
}
