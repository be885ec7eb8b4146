//! Raw node tree reconstruction
//!
//! [`TreeBuilder`] turns the flat event stream back into nested
//! [`RawNode`]s. Completed entity elements are handed to their bucket as
//! soon as they close; everything else is folded into its still-open parent,
//! so memory stays proportional to the open ancestor chain.

use indexmap::IndexMap;

use crate::buckets::EntityBuckets;
use crate::classify::{classify, BASELINE_TAG};
use crate::error::{IngestError, Result};
use crate::xml::XmlEvent;

/// Value stored under a child key of a [`RawNode`]
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Node(RawNode),
    /// Repeated sibling tags, in document order
    List(Vec<RawValue>),
}

impl RawValue {
    /// Scalar text of this value
    ///
    /// A node yields its own text, a list yields its first item's scalar.
    pub fn scalar(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            RawValue::Node(node) => node.text(),
            RawValue::List(items) => items.first().and_then(RawValue::scalar),
        }
    }

    /// Sub-property of a nested record (first occurrence for lists)
    pub fn property(&self, name: &str) -> Option<&RawValue> {
        match self {
            RawValue::Text(_) => None,
            RawValue::Node(node) => node.get(name),
            RawValue::List(items) => items.first().and_then(|item| item.property(name)),
        }
    }

    /// Occurrences of this value: the list items, or the value itself
    pub fn items(&self) -> &[RawValue] {
        match self {
            RawValue::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    pub fn as_node(&self) -> Option<&RawNode> {
        match self {
            RawValue::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// Transient element reconstructed from the event stream
///
/// Attributes and child elements share one ordered field map keyed by local
/// name. A key that occurs more than once is promoted to [`RawValue::List`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawNode {
    tag: String,
    fields: IndexMap<String, RawValue>,
    text: Option<String>,
}

impl RawNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Trimmed element text; never an empty string
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn set_text(&mut self, text: &str) {
        let trimmed = text.trim();
        self.text = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Builder-style field insertion, mainly for tests
    pub fn with(mut self, key: impl Into<String>, value: RawValue) -> Self {
        self.merge_child(key, value);
        self
    }

    /// Builder-style text child insertion
    pub fn with_text(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.with(key, RawValue::Text(text.into()))
    }

    /// Attach a completed child under `key`
    ///
    /// The first occurrence sets the key, the second promotes it to a list,
    /// later ones append. Sibling order is preserved.
    pub fn merge_child(&mut self, key: impl Into<String>, value: RawValue) {
        use indexmap::map::Entry;

        match self.fields.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            },
            Entry::Occupied(mut slot) => match slot.get_mut() {
                RawValue::List(items) => items.push(value),
                existing => {
                    let first = std::mem::replace(existing, RawValue::List(Vec::new()));
                    *existing = RawValue::List(vec![first, value]);
                },
            },
        }
    }

    /// Value this node contributes to its parent: its text when it has any,
    /// otherwise the node itself
    pub fn into_value(self) -> RawValue {
        match self.text {
            Some(text) => RawValue::Text(text),
            None => RawValue::Node(self),
        }
    }
}

struct Frame {
    node: RawNode,
    text: String,
}

/// Incremental builder fed one [`XmlEvent`] at a time
#[derive(Default)]
pub struct TreeBuilder {
    stack: Vec<Frame>,
    baseline_depth: usize,
    saw_root: bool,
    buckets: EntityBuckets,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a baseline subtree is currently open
    pub fn in_baseline(&self) -> bool {
        self.baseline_depth > 0
    }

    pub fn handle(&mut self, event: XmlEvent) -> Result<()> {
        match event {
            XmlEvent::Open { name, attributes } => self.open(name, attributes)?,
            XmlEvent::Text(text) => match self.stack.last_mut() {
                Some(frame) => frame.text.push_str(&text),
                None if text.trim().is_empty() => {},
                None => return Err(IngestError::TextOutsideRoot(text.trim().to_string())),
            },
            XmlEvent::Close { name } => self.close(&name)?,
        }
        Ok(())
    }

    fn open(&mut self, name: String, attributes: Vec<(String, String)>) -> Result<()> {
        if self.stack.is_empty() && self.saw_root {
            return Err(IngestError::MultipleRoots(name));
        }
        if name == BASELINE_TAG {
            self.baseline_depth += 1;
        }
        self.saw_root = true;

        let mut node = RawNode::new(name);
        for (key, value) in attributes {
            node.merge_child(key, RawValue::Text(value));
        }
        self.stack.push(Frame {
            node,
            text: String::new(),
        });
        Ok(())
    }

    /// Entity nodes go to their bucket only; the parent never holds a copy.
    fn close(&mut self, name: &str) -> Result<()> {
        let Some(Frame { mut node, text }) = self.stack.pop() else {
            return Err(IngestError::UnmatchedClose(name.to_string()));
        };
        if node.tag() != name {
            return Err(IngestError::MismatchedClose {
                expected: node.tag().to_string(),
                found: name.to_string(),
            });
        }
        node.set_text(&text);

        let is_baseline_frame = node.tag() == BASELINE_TAG;
        match classify(node.tag(), self.in_baseline()) {
            Some(bucket) => {
                tracing::trace!(tag = node.tag(), %bucket, "Entity closed");
                self.buckets.push(bucket, node);
            },
            None => {
                if let Some(parent) = self.stack.last_mut() {
                    let key = node.tag().to_string();
                    parent.node.merge_child(key, node.into_value());
                }
            },
        }

        if is_baseline_frame {
            self.baseline_depth = self.baseline_depth.saturating_sub(1);
        }
        Ok(())
    }

    /// Finish the document and hand back the filled buckets
    pub fn finish(self) -> Result<EntityBuckets> {
        if let Some(frame) = self.stack.last() {
            return Err(IngestError::UnexpectedEof {
                open: self.stack.len(),
                innermost: frame.node.tag().to_string(),
            });
        }
        if !self.saw_root {
            return Err(IngestError::EmptyDocument);
        }
        Ok(self.buckets)
    }
}
