//! Parse-side errors
//!
//! Every variant is terminal for a run: the document is rejected as a whole
//! and no partial buckets are handed to the dispatcher.

use thiserror::Error;

/// Result type alias for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed attribute at byte {position}: {source}")]
    Attribute {
        position: u64,
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    #[error("Input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Unexpected end of document: {open} element(s) still open, innermost <{innermost}>")]
    UnexpectedEof { open: usize, innermost: String },

    #[error("Closing tag </{found}> does not match open element <{expected}>")]
    MismatchedClose { expected: String, found: String },

    #[error("Closing tag </{0}> has no matching open element")]
    UnmatchedClose(String),

    #[error("Document contains no root element")]
    EmptyDocument,

    #[error("Second root element <{0}> after the document root was closed")]
    MultipleRoots(String),

    #[error("Text outside the root element: {0:?}")]
    TextOutsideRoot(String),

    #[error("Parse worker is not available")]
    WorkerUnavailable,
}
