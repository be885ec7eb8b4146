//! Ordered, chunked dispatch of normalized records to the sink
//!
//! [`DISPATCH_PLAN`] is the contract for send order: every stage finishes
//! before the next one starts, and the first rejected request ends the run.

use std::collections::BTreeMap;

use p6_common::{EntityKind, NormalizedRecord, Snapshot};
use p6_ingest::normalize::NormalizedBatch;
use p6_ingest::BucketId;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{error, info, instrument};

use crate::api::{AccessToken, SinkClient};
use crate::error::{CliError, Result};
use crate::progress::ProgressReporter;

/// Request body shape of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{ "<key>": [records...] }`, chunked
    Keyed(&'static str),
    /// One bare record per request
    Single,
}

/// One step of the dispatch plan
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub kind: EntityKind,
    pub path: &'static str,
    pub envelope: Envelope,
    /// Buckets sent by this stage, concatenated in this order
    pub sources: &'static [BucketId],
}

impl Stage {
    /// Records per request for a configured chunk size
    pub fn batch_size(&self, chunk_size: usize) -> usize {
        match self.envelope {
            Envelope::Single => 1,
            Envelope::Keyed(_) => chunk_size.max(1),
        }
    }

    /// Number of requests needed for `records` records
    pub fn request_count(&self, records: usize, chunk_size: usize) -> usize {
        records.div_ceil(self.batch_size(chunk_size))
    }
}

const fn bucket(kind: EntityKind, snapshot: Snapshot) -> BucketId {
    BucketId { kind, snapshot }
}

/// Stages in foreign-key dependency order
pub const DISPATCH_PLAN: [Stage; 6] = [
    Stage {
        kind: EntityKind::Calendar,
        path: "/p6calendars",
        envelope: Envelope::Keyed("calendars"),
        sources: &[bucket(EntityKind::Calendar, Snapshot::Current)],
    },
    Stage {
        kind: EntityKind::Resource,
        path: "/p6resources",
        envelope: Envelope::Keyed("resources"),
        sources: &[bucket(EntityKind::Resource, Snapshot::Current)],
    },
    Stage {
        kind: EntityKind::Project,
        path: "/projects",
        envelope: Envelope::Single,
        sources: &[bucket(EntityKind::Project, Snapshot::Current)],
    },
    Stage {
        kind: EntityKind::Wbs,
        path: "/p6wbsstagingroots",
        envelope: Envelope::Keyed("wbss"),
        sources: &[bucket(EntityKind::Wbs, Snapshot::Current)],
    },
    Stage {
        kind: EntityKind::Activity,
        path: "/p6activityroots",
        envelope: Envelope::Keyed("activitys"),
        sources: &[
            bucket(EntityKind::Activity, Snapshot::Current),
            bucket(EntityKind::Activity, Snapshot::Baseline),
        ],
    },
    Stage {
        kind: EntityKind::ResourceAssignment,
        path: "/p6resourceassignmentroots",
        envelope: Envelope::Keyed("resourceassignments"),
        sources: &[bucket(EntityKind::ResourceAssignment, Snapshot::Current)],
    },
];

/// Outcome of one completed stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub kind: EntityKind,
    pub path: &'static str,
    pub records: usize,
    pub requests: usize,
}

struct Keyed<'a> {
    key: &'static str,
    records: &'a [&'a NormalizedRecord],
}

impl Serialize for Keyed<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.records)?;
        map.end()
    }
}

/// Records of a stage, gathered from its source buckets
pub fn stage_records<'a>(
    stage: &Stage,
    batches: &'a BTreeMap<BucketId, NormalizedBatch>,
) -> Vec<&'a NormalizedRecord> {
    stage
        .sources
        .iter()
        .filter_map(|source| batches.get(source))
        .flat_map(|batch| batch.records.iter())
        .collect()
}

/// Sends stages one request at a time
pub struct BatchDispatcher<'a> {
    client: &'a SinkClient,
    token: &'a AccessToken,
    chunk_size: usize,
}

impl<'a> BatchDispatcher<'a> {
    pub fn new(client: &'a SinkClient, token: &'a AccessToken, chunk_size: usize) -> Self {
        Self {
            client,
            token,
            chunk_size,
        }
    }

    /// Run every stage of `plan` in order
    pub async fn run(
        &self,
        plan: &[Stage],
        batches: &BTreeMap<BucketId, NormalizedBatch>,
        progress: &mut ProgressReporter,
    ) -> Result<Vec<StageReport>> {
        let mut reports = Vec::with_capacity(plan.len());
        for stage in plan {
            let records = stage_records(stage, batches);
            reports.push(self.send_stage(stage, &records, progress).await?);
        }
        Ok(reports)
    }

    /// Send one stage; an empty stage sends nothing
    #[instrument(skip_all, fields(kind = %stage.kind, path = stage.path, records = records.len()))]
    pub async fn send_stage(
        &self,
        stage: &Stage,
        records: &[&NormalizedRecord],
        progress: &mut ProgressReporter,
    ) -> Result<StageReport> {
        let size = stage.batch_size(self.chunk_size);
        let total = stage.request_count(records.len(), self.chunk_size);
        progress.begin_stage(stage.kind.as_str(), total);

        for (index, chunk) in records.chunks(size).enumerate() {
            let response = match stage.envelope {
                Envelope::Keyed(key) => {
                    let body = Keyed { key, records: chunk };
                    self.client.post_json(stage.path, &body, self.token).await?
                },
                Envelope::Single => match chunk {
                    [record] => self.client.post_json(stage.path, *record, self.token).await?,
                    _ => return Err(CliError::config("single-record stage was given a multi-record chunk")),
                },
            };

            if !response.is_success() {
                let status = response.status.as_u16();
                error!(
                    request = index + 1,
                    total_requests = total,
                    status,
                    body = %response.body,
                    "Sink rejected request"
                );
                return Err(CliError::dispatch(stage.kind, index + 1, total, status, response.body));
            }
            progress.chunk_sent();
        }

        if total > 0 {
            info!(requests = total, "Stage sent");
        }
        Ok(StageReport {
            kind: stage.kind,
            path: stage.path,
            records: records.len(),
            requests: total,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use p6_common::FieldValue;
    use proptest::prelude::*;

    fn record(id: i64) -> NormalizedRecord {
        NormalizedRecord::new(EntityKind::Wbs, vec![("ObjectId", FieldValue::Int(id))])
    }

    #[test]
    fn test_plan_order_follows_dependencies() {
        let kinds: Vec<_> = DISPATCH_PLAN.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Calendar,
                EntityKind::Resource,
                EntityKind::Project,
                EntityKind::Wbs,
                EntityKind::Activity,
                EntityKind::ResourceAssignment,
            ]
        );
    }

    #[test]
    fn test_only_activities_send_baseline() {
        for stage in &DISPATCH_PLAN {
            let baseline = stage.sources.iter().any(|b| b.snapshot == Snapshot::Baseline);
            assert_eq!(baseline, stage.kind == EntityKind::Activity, "{}", stage.kind);
        }
    }

    #[test]
    fn test_project_is_single() {
        let project = DISPATCH_PLAN[2];
        assert_eq!(project.envelope, Envelope::Single);
        assert_eq!(project.batch_size(500), 1);
        assert_eq!(project.request_count(3, 500), 3);
    }

    #[test]
    fn test_keyed_envelope_shape() {
        let records = [record(1), record(2)];
        let refs: Vec<_> = records.iter().collect();
        let body = Keyed {
            key: "wbss",
            records: &refs,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "wbss": [{ "ObjectId": 1 }, { "ObjectId": 2 }] })
        );
    }

    #[test]
    fn test_stage_records_concatenates_current_then_baseline() {
        let mut batches = BTreeMap::new();
        batches.insert(
            BucketId::baseline(EntityKind::Activity),
            NormalizedBatch {
                records: vec![record(9)],
                parsed: 1,
                dropped: 0,
            },
        );
        batches.insert(
            BucketId::current(EntityKind::Activity),
            NormalizedBatch {
                records: vec![record(1), record(2)],
                parsed: 2,
                dropped: 0,
            },
        );

        let ids: Vec<_> = stage_records(&DISPATCH_PLAN[4], &batches)
            .iter()
            .map(|r| r.get("ObjectId").and_then(FieldValue::as_i64).unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 9]);
    }

    proptest! {
        #[test]
        fn prop_chunking_preserves_order_and_bounds(len in 0usize..400, size in 1usize..64) {
            let items: Vec<usize> = (0..len).collect();
            let stage = DISPATCH_PLAN[3];
            let chunks: Vec<&[usize]> = items.chunks(stage.batch_size(size)).collect();

            prop_assert_eq!(chunks.len(), stage.request_count(len, size));
            prop_assert_eq!(chunks.len(), len.div_ceil(size));
            for (i, chunk) in chunks.iter().enumerate() {
                if i + 1 < chunks.len() {
                    prop_assert_eq!(chunk.len(), size);
                } else {
                    prop_assert!(!chunk.is_empty() && chunk.len() <= size);
                }
            }
            let joined: Vec<usize> = chunks.concat();
            prop_assert_eq!(joined, items);
        }
    }
}
