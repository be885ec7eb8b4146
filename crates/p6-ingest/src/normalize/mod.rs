//! Field normalization
//!
//! Turns raw entity nodes into flat [`NormalizedRecord`]s using one fixed
//! [`Schema`] per entity kind. Tables are built once and shared.
//!
//! # Example
//!
//! ```
//! use p6_common::{EntityKind, FieldValue, Snapshot, UploadDate};
//! use p6_ingest::normalize::{normalize, NormalizeContext};
//! use p6_ingest::RawNode;
//!
//! let node = RawNode::new("Activity").with_text("ObjectId", "42");
//! let ctx = NormalizeContext::new(UploadDate::today(), Snapshot::Current);
//! let records = normalize(EntityKind::Activity, &node, &ctx).unwrap();
//! assert_eq!(records[0].get("objectId"), Some(&FieldValue::Int(42)));
//! ```

mod activity;
mod assignment;
pub mod calendar;
pub mod coerce;
mod project;
mod resource;
pub mod schema;
mod wbs;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use p6_common::{EntityKind, NormalizedRecord, UploadDate};

use crate::buckets::EntityBuckets;
use crate::classify::BucketId;
use crate::tree::RawNode;

pub use schema::{Coercion, FieldSpec, NormalizeContext, Requirement, Schema, Source, ValidationDrop};

static ACTIVITY: LazyLock<Schema> = LazyLock::new(activity::schema);
static ASSIGNMENT: LazyLock<Schema> = LazyLock::new(assignment::schema);
static PROJECT: LazyLock<Schema> = LazyLock::new(project::schema);
static RESOURCE: LazyLock<Schema> = LazyLock::new(resource::schema);
static WBS: LazyLock<Schema> = LazyLock::new(wbs::schema);

/// Field table for a kind; calendars expand into rules and have none
pub fn schema_for(kind: EntityKind) -> Option<&'static Schema> {
    match kind {
        EntityKind::Activity => Some(&ACTIVITY),
        EntityKind::ResourceAssignment => Some(&ASSIGNMENT),
        EntityKind::Project => Some(&PROJECT),
        EntityKind::Resource => Some(&RESOURCE),
        EntityKind::Wbs => Some(&WBS),
        EntityKind::Calendar => None,
    }
}

/// Output field names of a kind, in record order
pub fn field_names(kind: EntityKind) -> Vec<&'static str> {
    match schema_for(kind) {
        Some(schema) => schema.field_names().collect(),
        None => calendar::RULE_FIELDS.to_vec(),
    }
}

/// Normalize one raw node
///
/// Yields one record for structural kinds and zero or more rules for a
/// calendar. A node failing its required-field checks yields a
/// [`ValidationDrop`] instead.
pub fn normalize(
    kind: EntityKind,
    node: &RawNode,
    ctx: &NormalizeContext,
) -> Result<Vec<NormalizedRecord>, ValidationDrop> {
    match schema_for(kind) {
        Some(schema) => schema.normalize(node, ctx).map(|record| vec![record]),
        None => calendar::expand(node, ctx),
    }
}

/// Normalized output of one bucket
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedBatch {
    pub records: Vec<NormalizedRecord>,
    /// Raw nodes classified into the bucket
    pub parsed: usize,
    /// Raw nodes excluded by required-field checks
    pub dropped: usize,
}

/// Normalize every node of one bucket, skipping validation drops
pub fn normalize_bucket(bucket: BucketId, nodes: &[RawNode], upload_date: UploadDate) -> NormalizedBatch {
    let ctx = NormalizeContext::new(upload_date, bucket.snapshot);
    let mut batch = NormalizedBatch {
        parsed: nodes.len(),
        ..NormalizedBatch::default()
    };

    for node in nodes {
        match normalize(bucket.kind, node, &ctx) {
            Ok(records) => batch.records.extend(records),
            Err(drop) => {
                tracing::debug!(%bucket, reason = %drop, "Dropping record");
                batch.dropped += 1;
            },
        }
    }

    if batch.dropped > 0 {
        tracing::info!(
            %bucket,
            parsed = batch.parsed,
            dropped = batch.dropped,
            "Records dropped by validation"
        );
    }
    batch
}

/// Normalize all buckets of a parse
pub fn normalize_all(
    buckets: &EntityBuckets,
    upload_date: UploadDate,
) -> BTreeMap<BucketId, NormalizedBatch> {
    BucketId::all()
        .map(|bucket| (bucket, normalize_bucket(bucket, buckets.get(bucket), upload_date)))
        .collect()
}
