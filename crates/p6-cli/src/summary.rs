//! Per-run counts reported to the operator

use std::collections::BTreeMap;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};
use p6_common::{EntityKind, Snapshot, UploadDate};
use p6_ingest::normalize::NormalizedBatch;
use p6_ingest::BucketId;
use tracing::info;

use crate::dispatch::StageReport;

/// Counts for one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSummary {
    pub bucket: BucketId,
    /// Raw nodes classified into the bucket
    pub parsed: usize,
    /// Normalized records produced (calendars expand to several)
    pub normalized: usize,
    pub dropped: usize,
}

/// What one run parsed, dropped and sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub upload_date: UploadDate,
    pub buckets: Vec<BucketSummary>,
    pub stages: Vec<StageReport>,
}

impl RunSummary {
    pub fn from_batches(upload_date: UploadDate, batches: &BTreeMap<BucketId, NormalizedBatch>) -> Self {
        let buckets = batches
            .iter()
            .map(|(bucket, batch)| BucketSummary {
                bucket: *bucket,
                parsed: batch.parsed,
                normalized: batch.records.len(),
                dropped: batch.dropped,
            })
            .collect();
        Self {
            upload_date,
            buckets,
            stages: Vec::new(),
        }
    }

    pub fn with_stages(mut self, stages: Vec<StageReport>) -> Self {
        self.stages = stages;
        self
    }

    pub fn bucket(&self, bucket: BucketId) -> Option<&BucketSummary> {
        self.buckets.iter().find(|b| b.bucket == bucket)
    }

    pub fn total_dropped(&self) -> usize {
        self.buckets.iter().map(|b| b.dropped).sum()
    }

    pub fn total_requests(&self) -> usize {
        self.stages.iter().map(|s| s.requests).sum()
    }

    fn requests_for(&self, kind: EntityKind) -> Option<usize> {
        self.stages.iter().find(|s| s.kind == kind).map(|s| s.requests)
    }

    /// Emit one `info` event per bucket
    pub fn log(&self) {
        for b in &self.buckets {
            info!(
                bucket = %b.bucket,
                parsed = b.parsed,
                normalized = b.normalized,
                dropped = b.dropped,
                "Bucket summary"
            );
        }
        info!(
            upload_date = %self.upload_date,
            dropped = self.total_dropped(),
            requests = self.total_requests(),
            "Run summary"
        );
    }

    /// Table of buckets; the request column is filled for sent kinds
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Bucket", "Parsed", "Records", "Dropped", "Requests"]);

        for b in &self.buckets {
            // Requests belong to the stage, shown on its current bucket row
            let requests = match b.bucket.snapshot {
                Snapshot::Current => self.requests_for(b.bucket.kind),
                Snapshot::Baseline => None,
            };
            table.add_row(vec![
                Cell::new(b.bucket.label()),
                Cell::new(b.parsed),
                Cell::new(b.normalized),
                Cell::new(b.dropped),
                Cell::new(requests.map_or_else(|| "-".to_string(), |n| n.to_string())),
            ]);
        }
        table
    }
}
