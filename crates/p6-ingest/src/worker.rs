//! Reusable background parse worker
//!
//! Parsing runs on one dedicated OS thread, started on first use and kept
//! for later runs. Each job gets its own progress channel and a one-shot
//! result channel. The progress sender is dropped before the result is
//! sent, so a caller that drains progress to the end and then awaits the
//! result sees every update exactly once.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use tokio::sync::{mpsc, oneshot};

use crate::buckets::EntityBuckets;
use crate::error::{IngestError, Result};
use crate::pipeline::parse_file;
use crate::source::ParseProgress;

struct ParseJob {
    path: PathBuf,
    progress: mpsc::UnboundedSender<ParseProgress>,
    result: oneshot::Sender<Result<EntityBuckets>>,
}

/// Receiving side of one submitted parse
pub struct ParseHandle {
    progress: mpsc::UnboundedReceiver<ParseProgress>,
    result: oneshot::Receiver<Result<EntityBuckets>>,
}

impl ParseHandle {
    /// Drain progress into `on_progress`, then wait for the terminal result
    pub async fn finish<F>(mut self, mut on_progress: F) -> Result<EntityBuckets>
    where
        F: FnMut(ParseProgress),
    {
        while let Some(update) = self.progress.recv().await {
            on_progress(update);
        }
        self.result.await.map_err(|_| IngestError::WorkerUnavailable)?
    }
}

/// Lazily started parse thread
#[derive(Default)]
pub struct ParseWorker {
    jobs: Option<mpsc::UnboundedSender<ParseJob>>,
    thread: Option<JoinHandle<()>>,
}

impl ParseWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.jobs.is_some()
    }

    /// Queue a file for parsing
    pub fn submit(&mut self, path: impl AsRef<Path>) -> Result<ParseHandle> {
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = oneshot::channel();
        let job = ParseJob {
            path: path.as_ref().to_path_buf(),
            progress: progress_tx,
            result: result_tx,
        };

        self.sender()?
            .send(job)
            .map_err(|_| IngestError::WorkerUnavailable)?;

        Ok(ParseHandle {
            progress: progress_rx,
            result: result_rx,
        })
    }

    fn sender(&mut self) -> Result<&mpsc::UnboundedSender<ParseJob>> {
        let finished = self.thread.as_ref().is_some_and(JoinHandle::is_finished);
        if finished {
            tracing::warn!("Parse worker thread exited, restarting");
            self.jobs = None;
            self.thread = None;
        }

        if self.jobs.is_none() {
            let (tx, rx) = mpsc::unbounded_channel();
            let thread = std::thread::Builder::new()
                .name("p6-parse".to_string())
                .spawn(move || run(rx))?;
            tracing::debug!("Parse worker started");
            self.jobs = Some(tx);
            self.thread = Some(thread);
        }

        self.jobs.as_ref().ok_or(IngestError::WorkerUnavailable)
    }
}

fn run(mut jobs: mpsc::UnboundedReceiver<ParseJob>) {
    while let Some(ParseJob {
        path,
        progress,
        result,
    }) = jobs.blocking_recv()
    {
        let span = tracing::info_span!("parse", path = %path.display());
        let _guard = span.enter();

        let outcome = parse_file(&path, |update| {
            // A caller that stopped listening still gets the result
            let _ = progress.send(update);
        });
        drop(progress);

        if let Err(err) = &outcome {
            tracing::error!(error = %err, "Parse failed");
        }
        if result.send(outcome).is_err() {
            tracing::debug!("Parse result dropped by caller");
        }
    }
    tracing::debug!("Parse worker stopped");
}
