//! Entity classification
//!
//! Maps a closed element to its output bucket from the tag name and whether
//! a `BaselineProject` subtree was open when it closed.

use p6_common::{EntityKind, Snapshot};

/// Element that wraps a baseline copy of a project
pub const BASELINE_TAG: &str = "BaselineProject";

/// Output bucket for raw entity nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId {
    pub kind: EntityKind,
    pub snapshot: Snapshot,
}

impl BucketId {
    pub fn new(kind: EntityKind, snapshot: Snapshot) -> Self {
        Self { kind, snapshot }
    }

    pub fn current(kind: EntityKind) -> Self {
        Self::new(kind, Snapshot::Current)
    }

    pub fn baseline(kind: EntityKind) -> Self {
        Self::new(kind, Snapshot::Baseline)
    }

    /// Every bucket the classifier can produce
    pub fn all() -> impl Iterator<Item = BucketId> {
        EntityKind::ALL.into_iter().flat_map(|kind| {
            let baseline = kind.supports_baseline().then(|| BucketId::baseline(kind));
            std::iter::once(BucketId::current(kind)).chain(baseline)
        })
    }

    /// Stable file-friendly name, e.g. `baseline_activity`
    pub fn label(&self) -> String {
        match self.snapshot {
            Snapshot::Current => self.kind.as_str().to_string(),
            Snapshot::Baseline => format!("baseline_{}", self.kind.as_str()),
        }
    }
}

impl std::fmt::Display for BucketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

fn entity_kind(tag: &str) -> Option<EntityKind> {
    match tag {
        "Project" => Some(EntityKind::Project),
        "WBS" => Some(EntityKind::Wbs),
        "Activity" => Some(EntityKind::Activity),
        "Resource" => Some(EntityKind::Resource),
        "ResourceAssignment" => Some(EntityKind::ResourceAssignment),
        "Calendar" => Some(EntityKind::Calendar),
        _ => None,
    }
}

/// Whether `tag` is routed to a bucket rather than merged into its parent
pub fn is_entity_tag(tag: &str) -> bool {
    tag == BASELINE_TAG || entity_kind(tag).is_some()
}

/// Bucket for a closed element, or `None` for ordinary elements
///
/// `BaselineProject` itself carries the baseline project's fields and lands
/// in the baseline project bucket. Calendars are never baselined.
pub fn classify(tag: &str, in_baseline: bool) -> Option<BucketId> {
    if tag == BASELINE_TAG {
        return Some(BucketId::baseline(EntityKind::Project));
    }

    let kind = entity_kind(tag)?;
    if in_baseline && kind.supports_baseline() {
        Some(BucketId::baseline(kind))
    } else {
        Some(BucketId::current(kind))
    }
}
