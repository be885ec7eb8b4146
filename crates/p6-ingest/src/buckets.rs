//! Per-bucket storage for raw entity nodes

use std::collections::BTreeMap;

use crate::classify::BucketId;
use crate::tree::RawNode;

/// Raw entity nodes grouped by bucket, each in document order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntityBuckets {
    nodes: BTreeMap<BucketId, Vec<RawNode>>,
}

impl EntityBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bucket: BucketId, node: RawNode) {
        self.nodes.entry(bucket).or_default().push(node);
    }

    /// Nodes in a bucket; empty when nothing was classified there
    pub fn get(&self, bucket: BucketId) -> &[RawNode] {
        self.nodes.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, bucket: BucketId) -> usize {
        self.get(bucket).len()
    }

    pub fn total(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
