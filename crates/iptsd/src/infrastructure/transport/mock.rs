//! Queue-backed report source for tests.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::application::ingest::{ReadOutcome, ReportSource, TransportError};

/// Replays a fixed list of driver buffers, then reports `Closed`.
#[derive(Debug, Default)]
pub struct MockReportSource {
    queue: VecDeque<ReadOutcome>,
    buffers: VecDeque<Vec<u8>>,
    fail_at_end: bool,
    /// Number of `next_report` calls made so far.
    pub reads: usize,
}

impl MockReportSource {
    pub fn new(buffers: Vec<Vec<u8>>) -> Self {
        let queue = buffers.iter().map(|b| ReadOutcome::Report(b.len())).collect();
        Self {
            queue,
            buffers: buffers.into(),
            fail_at_end: false,
            reads: 0,
        }
    }

    /// Inserts an `Idle` read before every buffer.
    pub fn with_idle_between(mut self) -> Self {
        self.queue = self
            .queue
            .into_iter()
            .flat_map(|outcome| [ReadOutcome::Idle, outcome])
            .collect();
        self
    }

    /// Ends with a read error instead of `Closed`.
    pub fn failing_after_queue(mut self) -> Self {
        self.fail_at_end = true;
        self
    }
}

#[async_trait]
impl ReportSource for MockReportSource {
    async fn next_report(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, TransportError> {
        self.reads += 1;
        match self.queue.pop_front() {
            Some(ReadOutcome::Report(_)) => {
                let data = self.buffers.pop_front().unwrap_or_default();
                let max = buf.len();
                let target = buf.get_mut(..data.len()).ok_or(TransportError::FrameTooLarge {
                    size: data.len(),
                    max,
                })?;
                target.copy_from_slice(&data);
                Ok(ReadOutcome::Report(data.len()))
            }
            Some(other) => Ok(other),
            None if self.fail_at_end => Err(TransportError::Read(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "simulated device loss",
            ))),
            None => Ok(ReadOutcome::Closed),
        }
    }
}
