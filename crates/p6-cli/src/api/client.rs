//! Upload sink client

use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use super::endpoints;
use super::token::AccessToken;
use crate::error::Result;

/// Status and body of one sink reply
#[derive(Debug, Clone)]
pub struct SinkResponse {
    pub status: StatusCode,
    pub body: String,
}

impl SinkResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// JSON POST client rooted at the sink base URL
pub struct SinkClient {
    client: reqwest::Client,
    base_url: String,
}

impl SinkClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to a collection path with the bearer token
    ///
    /// Transport failures are errors; HTTP error statuses are returned to
    /// the caller so it can name the rejected request.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        token: &AccessToken,
    ) -> Result<SinkResponse> {
        let url = endpoints::collection_url(&self.base_url, path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(SinkResponse { status, body })
    }
}
