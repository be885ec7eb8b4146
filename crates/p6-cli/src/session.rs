//! Serialized parse-and-dispatch runs
//!
//! A [`Session`] owns the reusable parse worker. Only one run may hold it
//! at a time; a second caller is turned away instead of queued.

use std::collections::BTreeMap;
use std::path::Path;

use p6_common::UploadDate;
use p6_ingest::normalize::{normalize_all, NormalizedBatch};
use p6_ingest::{BucketId, EntityBuckets, ParseWorker};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, info_span, Instrument};

use crate::api::{self, SinkClient, TokenClient};
use crate::config::Config;
use crate::dispatch::{BatchDispatcher, DISPATCH_PLAN};
use crate::error::{CliError, Result};
use crate::progress::ProgressReporter;
use crate::summary::RunSummary;

/// Normalized buckets of a run that sent nothing
#[derive(Debug)]
pub struct Inspection {
    pub summary: RunSummary,
    pub batches: BTreeMap<BucketId, NormalizedBatch>,
}

/// Control side of the pipeline
#[derive(Default)]
pub struct Session {
    worker: Mutex<ParseWorker>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse, normalize and send `path` to the configured sink
    pub async fn upload(
        &self,
        path: &Path,
        upload_date: UploadDate,
        config: &Config,
        progress: &mut ProgressReporter,
    ) -> Result<RunSummary> {
        let span = info_span!("run", file = %path.display(), %upload_date, mode = "upload");
        let result = async {
            config.validate()?;
            let mut worker = self.lock()?;

            let batches = parse_and_normalize(&mut worker, path, upload_date, progress).await?;

            let http = api::http_client(config.http_timeout)?;
            let token = TokenClient::new(http.clone(), config.token_url.as_str()).fetch().await?;
            let sink = SinkClient::new(http, config.sink_base_url()?);

            let dispatcher = BatchDispatcher::new(&sink, &token, config.chunk_size);
            let stages = dispatcher.run(&DISPATCH_PLAN, &batches, progress).await?;

            let summary = RunSummary::from_batches(upload_date, &batches).with_stages(stages);
            summary.log();
            Ok::<_, CliError>(summary)
        }
        .instrument(span)
        .await;

        finish(result, progress)
    }

    /// Parse and normalize `path` without contacting any service
    pub async fn inspect(
        &self,
        path: &Path,
        upload_date: UploadDate,
        progress: &mut ProgressReporter,
    ) -> Result<Inspection> {
        let span = info_span!("run", file = %path.display(), %upload_date, mode = "inspect");
        let result = async {
            let mut worker = self.lock()?;
            let batches = parse_and_normalize(&mut worker, path, upload_date, progress).await?;
            let summary = RunSummary::from_batches(upload_date, &batches);
            summary.log();
            Ok::<_, CliError>(Inspection { summary, batches })
        }
        .instrument(span)
        .await;

        finish(result, progress)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ParseWorker>> {
        self.worker.try_lock().map_err(|_| CliError::RunInProgress)
    }
}

async fn parse_and_normalize(
    worker: &mut ParseWorker,
    path: &Path,
    upload_date: UploadDate,
    progress: &mut ProgressReporter,
) -> Result<BTreeMap<BucketId, NormalizedBatch>> {
    let handle = worker.submit(path)?;
    let buckets: EntityBuckets = handle.finish(|update| progress.parse_progress(update)).await?;
    progress.parse_complete();
    info!(nodes = buckets.total(), "Parsed export");

    Ok(normalize_all(&buckets, upload_date))
}

/// Settle progress for a finished run
fn finish<T>(result: Result<T>, progress: &mut ProgressReporter) -> Result<T> {
    match &result {
        Ok(_) => progress.complete(),
        Err(_) => progress.abort(),
    }
    result
}
