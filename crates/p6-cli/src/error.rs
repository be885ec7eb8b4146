//! Error types for the p6sync CLI
//!
//! Every error is terminal for the run that raised it and is shown to the
//! operator as a single line, so messages say what failed and what to check.

use p6_common::EntityKind;
use p6_ingest::IngestError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Operator-facing failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Auth,
    Dispatch,
    Config,
    Io,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Parse => "parse",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Dispatch => "dispatch",
            ErrorCategory::Config => "config",
            ErrorCategory::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    /// The export could not be read or is not well-formed XML
    #[error("XML parse error: {0}. Nothing was sent; fix or re-export the file and retry.")]
    Parse(#[from] IngestError),

    /// The token service refused or failed to issue a token
    #[error("Failed to get access token: {0}. Check that the token service is running and its client credentials are valid.")]
    Auth(String),

    /// The sink rejected a request; earlier requests stay applied
    #[error("Upload of {kind} request {chunk}/{total_chunks} rejected with HTTP {status}: {body}. Requests sent before this one were applied.")]
    Dispatch {
        kind: EntityKind,
        chunk: usize,
        total_chunks: usize,
        status: u16,
        body: String,
    },

    /// Transport-level HTTP failure
    #[error("Network request failed: {0}. Check your connection and the configured URLs.")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables, .env file or command-line flags.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Another run holds the session
    #[error("Another run is already in progress. Wait for it to finish before starting a new one.")]
    RunInProgress,
}

impl CliError {
    /// Create an auth error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a dispatch error for a rejected request
    pub fn dispatch(
        kind: EntityKind,
        chunk: usize,
        total_chunks: usize,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::Dispatch {
            kind,
            chunk,
            total_chunks,
            status,
            body: body.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::Parse(_) => ErrorCategory::Parse,
            CliError::Auth(_) => ErrorCategory::Auth,
            CliError::Dispatch { .. } | CliError::Http(_) => ErrorCategory::Dispatch,
            CliError::Config(_) | CliError::RunInProgress => ErrorCategory::Config,
            CliError::Io(_) => ErrorCategory::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_message_names_the_request() {
        let err = CliError::dispatch(EntityKind::Activity, 2, 3, 400, "bad field");
        let msg = err.to_string();
        assert!(msg.contains("activity request 2/3"));
        assert!(msg.contains("HTTP 400"));
        assert!(msg.contains("bad field"));
        assert_eq!(err.category(), ErrorCategory::Dispatch);
    }

    #[test]
    fn test_categories() {
        assert_eq!(CliError::auth("denied").category(), ErrorCategory::Auth);
        assert_eq!(CliError::config("x").category(), ErrorCategory::Config);
        assert_eq!(
            CliError::Parse(IngestError::EmptyDocument).category(),
            ErrorCategory::Parse
        );
        assert_eq!(CliError::Parse(IngestError::EmptyDocument).category().as_str(), "parse");
    }
}
