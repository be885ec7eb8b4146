//! Error types shared across p6sync crates

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, P6Error>;

/// Errors raised by the shared domain types
#[derive(Error, Debug)]
pub enum P6Error {
    #[error("Invalid upload date '{0}': expected YYYY-MM-DD")]
    InvalidUploadDate(String),

    #[error("Unknown entity kind '{0}'")]
    UnknownEntityKind(String),
}
