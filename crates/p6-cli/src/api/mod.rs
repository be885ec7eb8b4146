//! HTTP clients for the token relay and the upload sink

pub mod client;
pub mod endpoints;
pub mod token;

pub use client::{SinkClient, SinkResponse};
pub use token::{AccessToken, TokenClient};

use std::time::Duration;

use crate::error::Result;

/// Build the shared HTTP client, honouring an optional timeout
pub(crate) fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("p6sync/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
