//! Single-pass parse of an export into entity buckets

use std::io::BufRead;
use std::path::Path;

use crate::buckets::EntityBuckets;
use crate::error::Result;
use crate::source::{open_export, ParseProgress};
use crate::tree::TreeBuilder;
use crate::xml::StreamParser;

/// Parse a whole document from a buffered source
///
/// Fails on the first syntax error; no partial buckets are returned.
pub fn parse_document<R: BufRead>(source: R) -> Result<EntityBuckets> {
    let mut parser = StreamParser::new(source);
    let mut builder = TreeBuilder::new();

    while let Some(event) = parser.next_event()? {
        builder.handle(event)?;
    }

    let buckets = builder.finish()?;
    tracing::debug!(entities = buckets.total(), "Document parsed");
    Ok(buckets)
}

/// Parse an export file, reporting byte progress as it is read
pub fn parse_file<F>(path: &Path, on_progress: F) -> Result<EntityBuckets>
where
    F: FnMut(ParseProgress),
{
    let source = open_export(path, on_progress)?;
    parse_document(source)
}
