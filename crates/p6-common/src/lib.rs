//! p6sync Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling and logging for the p6sync workspace.
//!
//! # Overview
//!
//! - **Types**: entity kinds, typed field values and normalized records
//! - **Error Handling**: the shared [`P6Error`] and [`Result`] alias
//! - **Logging**: tracing subscriber configuration used by every binary
//!
//! # Example
//!
//! ```no_run
//! use p6_common::types::{EntityKind, UploadDate};
//!
//! let kind: EntityKind = "activity".parse().unwrap();
//! let date = UploadDate::today();
//! println!("{kind} records stamped {date}");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{P6Error, Result};
pub use types::{EntityKind, FieldValue, NormalizedRecord, Snapshot, UploadDate};
