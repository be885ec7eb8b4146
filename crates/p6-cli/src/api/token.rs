//! Bearer token relay client

use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

/// Bearer credential attached to every sink request
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the stateless client-credentials relay
pub struct TokenClient {
    client: reqwest::Client,
    url: String,
}

impl TokenClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Request a fresh token; any non-2xx reply is an auth failure
    pub async fn fetch(&self) -> Result<AccessToken> {
        debug!(url = %self.url, "Requesting access token");

        let response = self
            .client
            .post(&self.url)
            .send()
            .await
            .map_err(|e| CliError::auth(format!("token service unreachable at {}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CliError::auth(format!("HTTP {}: {}", status.as_u16(), body.trim())));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| CliError::auth(format!("malformed token response: {e}")))?;
        if parsed.access_token.is_empty() {
            return Err(CliError::auth("token service returned an empty access_token"));
        }
        Ok(AccessToken(parsed.access_token))
    }
}
