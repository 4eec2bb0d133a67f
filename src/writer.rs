//! Writer loop
//!
//! The single long-lived task that drains the record queue, applies the
//! rotation policy, writes, and periodically flushes. The loop terminates
//! once the submission side of the queue has closed and the backlog is
//! fully drained.

use crate::error::Result;
use crate::sink::FileSink;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// The consuming half of the pipeline
pub(crate) struct WriterLoop {
    queue: mpsc::Receiver<String>,
    sink: FileSink,
    rotate_after: Duration,
    min_flush: u32,
}

impl WriterLoop {
    pub(crate) fn new(
        queue: mpsc::Receiver<String>,
        sink: FileSink,
        rotate_after: Duration,
        min_flush: u32,
    ) -> Self {
        Self {
            queue,
            sink,
            rotate_after,
            min_flush,
        }
    }

    /// Drain the queue until it closes, then flush and close the sink
    ///
    /// Rotation is checked before the flush threshold: closing a file is an
    /// effective flush. `since_flush` counts iterations since the last
    /// durability point, so both rotation and an explicit flush reset it.
    pub(crate) async fn run(mut self) -> Result<()> {
        let mut since_flush: u32 = 0;

        while let Some(record) = self.queue.recv().await {
            since_flush += 1;

            if self.sink.age() > self.rotate_after {
                self.sink.rotate().await?;
                debug!(path = %self.sink.path().display(), "rotated log file");
                since_flush = 0;
            } else if since_flush >= self.min_flush {
                self.sink.flush().await?;
                since_flush = 0;
            }

            self.sink.write_record(&record).await?;

            // Sustained log volume must not starve other tasks.
            tokio::task::yield_now().await;
        }

        self.sink.close().await
    }
}
