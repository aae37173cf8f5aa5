//! Replays a capture file of back-to-back driver buffers.
//!
//! Each record is a 64-byte frame header followed by exactly `header.size`
//! body bytes, i.e. the bytes the device node would have returned.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use ipts_core::{FrameHeader, HEADER_SIZE};
use tokio::{
    fs::File,
    io::{AsyncReadExt, BufReader},
};
use tracing::debug;

use crate::application::ingest::{ReadOutcome, ReportSource, TransportError};

pub struct ReplayReportSource {
    reader: BufReader<File>,
    replayed: u64,
}

impl ReplayReportSource {
    /// Opens the capture at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] if the file cannot be opened.
    pub async fn open(path: &Path) -> Result<Self, TransportError> {
        let file = File::open(path).await.map_err(|source| TransportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            reader: BufReader::new(file),
            replayed: 0,
        })
    }
}

#[async_trait]
impl ReportSource for ReplayReportSource {
    async fn next_report(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, TransportError> {
        let max = buf.len();
        let Some(head) = buf.get_mut(..HEADER_SIZE) else {
            return Err(TransportError::FrameTooLarge {
                size: HEADER_SIZE,
                max,
            });
        };

        match self.reader.read_exact(head).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                debug!(replayed = self.replayed, "capture exhausted");
                return Ok(ReadOutcome::Closed);
            }
            Err(e) => return Err(TransportError::Read(e)),
        }

        // The header slice was just filled, so parsing cannot fail on length.
        let header = FrameHeader::parse(head).map_err(|e| {
            TransportError::Read(std::io::Error::new(ErrorKind::InvalidData, e))
        })?;
        let total = HEADER_SIZE.saturating_add(header.size as usize);
        let body = buf
            .get_mut(HEADER_SIZE..total)
            .ok_or(TransportError::FrameTooLarge { size: total, max })?;
        self.reader.read_exact(body).await?;

        self.replayed += 1;
        Ok(ReadOutcome::Report(total))
    }
}
