//! Streaming ingest of project-schedule XML exports
//!
//! Reads an export in a single pass, rebuilds entity elements from the
//! event stream, sorts them into current and baseline buckets and
//! normalizes them into flat typed records.
//!
//! ```no_run
//! use p6_common::UploadDate;
//! use p6_ingest::{normalize::normalize_all, parse_file};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let buckets = parse_file("export.xml".as_ref(), |_| {})?;
//! let batches = normalize_all(&buckets, UploadDate::today());
//! for (bucket, batch) in &batches {
//!     println!("{bucket}: {} records", batch.records.len());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod buckets;
pub mod classify;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod source;
pub mod tree;
pub mod worker;
pub mod xml;

pub use buckets::EntityBuckets;
pub use classify::{classify, BucketId};
pub use error::{IngestError, Result};
pub use pipeline::{parse_document, parse_file};
pub use source::ParseProgress;
pub use tree::{RawNode, RawValue, TreeBuilder};
pub use worker::{ParseHandle, ParseWorker};
pub use xml::{StreamParser, XmlEvent};
