//! Bangumi API client
//!
//! Wraps the subject search endpoint (`POST /v0/search/subjects`). The client
//! returns the raw response body so callers can persist it verbatim before
//! decoding.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::SearchSubjectsRequest;
use crate::error::Error;

/// Base URL for the Bangumi API
const BANGUMI_API_BASE_URL: &str = "https://api.bgm.tv";

/// The API rejects requests without an identifying user agent
const USER_AGENT: &str = concat!("bgm-season/", env!("CARGO_PKG_VERSION"));

/// Page size requested from the search endpoint
pub const SEARCH_PAGE_LIMIT: u32 = 25;

/// Anything that can run a subject search and hand back the response body
#[async_trait]
pub trait SubjectSearch: Send + Sync {
    async fn search_subjects(
        &self,
        request: &SearchSubjectsRequest,
        limit: u32,
    ) -> Result<String, Error>;
}

/// Authenticated client for the Bangumi API
#[derive(Debug, Clone)]
pub struct BangumiClient {
    http_client: Client,
    token: String,
    base_url: String,
}

impl BangumiClient {
    /// Creates a client that sends `token` as a bearer credential
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http_client,
            token: token.into(),
            base_url: BANGUMI_API_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SubjectSearch for BangumiClient {
    async fn search_subjects(
        &self,
        request: &SearchSubjectsRequest,
        limit: u32,
    ) -> Result<String, Error> {
        let url = self.url("/v0/search/subjects");
        tracing::debug!(%url, limit, "Searching subjects");

        let response = self
            .http_client
            .post(&url)
            .query(&[("limit", limit)])
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }
}
