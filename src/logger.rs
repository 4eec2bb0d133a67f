//! Pipeline lifecycle controller
//!
//! `Logger` is the public face of the pipeline: it validates and encodes
//! submissions, owns the bounded queue's sender side, spawns the writer
//! task on `start`, and drains it on `stop`. Clones share one pipeline;
//! `Logger::shared` hands out the process-wide instance.

use crate::config::{Config, ManageFileConfig};
use crate::entry::{Level, LogEntry, Source, Speed};
use crate::error::{LoggerError, Result};
use crate::sink::FileSink;
use crate::writer::WriterLoop;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

static SHARED: OnceLock<Logger> = OnceLock::new();

#[derive(Default)]
struct State {
    running: bool,
    queue_tx: Option<mpsc::Sender<String>>,
    writer: Option<JoinHandle<Result<()>>>,
}

struct Inner {
    config: ManageFileConfig,
    // Never held across an await; lifecycle transitions release it before
    // any I/O or channel operation.
    state: Mutex<State>,
}

/// Handle to the logging pipeline
///
/// Clones are cheap and address the same pipeline.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Create an independent pipeline handle
    ///
    /// Use this form to pass the logger explicitly through the application;
    /// `shared` covers the one-per-process case.
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: config.manage_file,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Process-wide pipeline instance
    ///
    /// The first call constructs the pipeline from `config`; every later
    /// call returns the same instance and ignores its argument.
    pub fn shared(config: Config) -> Logger {
        SHARED.get_or_init(|| Logger::new(config)).clone()
    }

    /// Whether the pipeline currently accepts records
    pub fn is_running(&self) -> bool {
        self.inner.state.lock().running
    }

    /// Open the first output file and launch the writer task
    pub async fn start(&self) -> Result<()> {
        // Reserve the running flag up front so a concurrent start loses
        // with `AlreadyRunning` instead of spawning a second writer.
        {
            let mut state = self.inner.state.lock();
            if state.running {
                return Err(LoggerError::AlreadyRunning);
            }
            state.running = true;
        }

        let sink = match FileSink::create(&self.inner.config.path).await {
            Ok(sink) => sink,
            Err(e) => {
                self.inner.state.lock().running = false;
                return Err(e);
            }
        };

        let (tx, rx) = mpsc::channel(self.inner.config.max_pending.max(1));
        let writer = WriterLoop::new(
            rx,
            sink,
            Duration::from_secs(self.inner.config.time_rotate),
            self.inner.config.min_flush,
        );

        let task = tokio::spawn(async move {
            let result = writer.run().await;
            if let Err(ref e) = result {
                // The file sink is broken at this point; the process error
                // stream is the only remaining channel.
                error!("log writer failed: {}", e);
            }
            result
        });

        {
            let mut state = self.inner.state.lock();
            if state.running {
                state.queue_tx = Some(tx);
                state.writer = Some(task);
                info!(path = %self.inner.config.path.display(), "logging pipeline started");
                return Ok(());
            }
        }

        // stop() raced us while the sink was opening; unwind the writer.
        drop(tx);
        let _ = task.await;
        Err(LoggerError::NotRunning)
    }

    /// Drain every accepted record, close the active file, stop the writer
    ///
    /// No timeout is applied to the drain: a stalled sink stalls shutdown
    /// rather than losing records.
    pub async fn stop(&self) -> Result<()> {
        let (tx, task) = {
            let mut state = self.inner.state.lock();
            if !state.running {
                return Err(LoggerError::NotRunning);
            }
            state.running = false;
            (state.queue_tx.take(), state.writer.take())
        };

        // Closing the submission side lets the writer finish the backlog
        // and return. In-flight add_log calls holding a sender clone still
        // complete, and their records are written before the join below
        // resolves.
        drop(tx);

        if let Some(task) = task {
            match task.await {
                Ok(result) => result?,
                Err(_) => return Err(LoggerError::WriterClosed),
            }
        }

        info!("logging pipeline stopped");
        Ok(())
    }

    /// Validate, encode, and enqueue one log record
    ///
    /// Suspends cooperatively when the queue is at capacity; an accepted
    /// record is never dropped. Validation and serialization failures
    /// surface here, before anything reaches the queue.
    pub async fn add_log(
        &self,
        source: Source,
        level: Level,
        note: impl Into<String>,
        error: Option<String>,
        speed: Option<Speed>,
        other: Option<Map<String, Value>>,
    ) -> Result<()> {
        let entry = LogEntry::new(source, level, note, error, speed, other)?;
        let record = entry.encode()?;

        let tx = {
            let state = self.inner.state.lock();
            if !state.running {
                return Err(LoggerError::NotRunning);
            }
            state.queue_tx.clone().ok_or(LoggerError::NotRunning)?
        };

        tx.send(record).await.map_err(|_| LoggerError::WriterClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.join(format!("botlog-logger-{}-{}-{}", tag, pid, ts))
    }

    fn test_config(dir: &PathBuf) -> Config {
        Config {
            manage_file: ManageFileConfig {
                max_pending: 8,
                path: dir.clone(),
                time_rotate: 3600,
                min_flush: 16,
            },
        }
    }

    #[tokio::test]
    async fn test_add_log_before_start_is_rejected() {
        let dir = unique_temp_dir("not-running");
        let logger = Logger::new(test_config(&dir));

        let result = logger
            .add_log(Source::Core, Level::Info, "too early", None, None, None)
            .await;

        assert!(matches!(result, Err(LoggerError::NotRunning)));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_double_start_is_rejected() {
        let dir = unique_temp_dir("double-start");
        let logger = Logger::new(test_config(&dir));

        logger.start().await.unwrap();
        let second = logger.start().await;
        assert!(matches!(second, Err(LoggerError::AlreadyRunning)));

        logger.stop().await.unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_stop_without_start_is_rejected() {
        let dir = unique_temp_dir("stop-stopped");
        let logger = Logger::new(test_config(&dir));

        let result = logger.stop().await;
        assert!(matches!(result, Err(LoggerError::NotRunning)));
    }

    #[tokio::test]
    async fn test_start_fails_on_unusable_path() {
        let dir = unique_temp_dir("bad-path");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        // The log directory sits below a regular file
        let mut config = test_config(&dir);
        config.manage_file.path = blocker.join("logs");
        let logger = Logger::new(config);

        let result = logger.start().await;
        assert!(matches!(result, Err(LoggerError::Io { .. })));
        assert!(!logger.is_running());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_validation_failure_leaves_pipeline_usable() {
        let dir = unique_temp_dir("validation");
        let logger = Logger::new(test_config(&dir));
        logger.start().await.unwrap();

        let invalid = logger
            .add_log(Source::Core, Level::Info, "", None, None, None)
            .await;
        assert!(matches!(invalid, Err(LoggerError::AddLog { .. })));

        logger
            .add_log(Source::Core, Level::Info, "still alive", None, None, None)
            .await
            .unwrap();
        logger.stop().await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
