//! Genius API HTTP client.
//!
//! Handles authenticated requests against the Genius web API.
//! See: https://docs.genius.com
//!
//! Genius embeds its own status in the body (`meta.status`) and may answer
//! HTTP 200 with an error-bearing body, so both statuses are checked.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::GeniusError;
use super::models::{ApiEnvelope, ArtistResponse, ArtistSongsResponse, SearchResponse, SongResponse};
use crate::core::config::GeniusConfig;

/// User agent sent with every request, to the API and to song pages.
pub const USER_AGENT: &str = concat!("MCP-Genius-Server/", env!("CARGO_PKG_VERSION"));

/// Sort order for an artist's songs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum SongSort {
    /// Alphabetical by title.
    Title,
    /// Most popular first.
    Popularity,
}

impl SongSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Popularity => "popularity",
        }
    }
}

/// Paging options for `GET /artists/{id}/songs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtistSongsQuery {
    pub sort: Option<SongSort>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ArtistSongsQuery {
    fn to_params(self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }
}

/// Build the shared HTTP client used for the API and for song pages.
pub fn build_http_client(config: &GeniusConfig) -> Result<reqwest::Client, GeniusError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| GeniusError::transport(format!("Failed to create HTTP client: {e}")))
}

/// Genius API client.
///
/// Holds no per-call state; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GeniusClient {
    http: reqwest::Client,
    api_base: String,
    access_token: Option<String>,
}

impl std::fmt::Debug for GeniusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeniusClient")
            .field("api_base", &self.api_base)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GeniusClient {
    /// Create a new client from configuration.
    pub fn new(config: &GeniusConfig) -> Result<Self, GeniusError> {
        Ok(Self::with_http(build_http_client(config)?, config))
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_http(http: reqwest::Client, config: &GeniusConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Resolve an endpoint and its query parameters into a full URL.
    ///
    /// Duplicate keys keep the last value.
    pub fn endpoint_url(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<String, GeniusError> {
        let mut url = format!("{}/{}", self.api_base, endpoint.trim_start_matches('/'));

        let mut unique: Vec<(&str, &str)> = Vec::with_capacity(params.len());
        for (key, value) in params {
            match unique.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value,
                None => unique.push((key, value)),
            }
        }

        if !unique.is_empty() {
            let query = serde_urlencoded::to_string(&unique)
                .map_err(|e| GeniusError::decode(format!("Invalid query parameters: {e}")))?;
            url.push('?');
            url.push_str(&query);
        }

        Ok(url)
    }

    /// Perform an authenticated GET and return the validated JSON body.
    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    pub async fn request(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, GeniusError> {
        let token = self
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GeniusError::authentication(endpoint))?;

        let url = self.endpoint_url(endpoint, params)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeniusError::transport("Request timed out")
                } else if e.is_connect() {
                    GeniusError::transport(format!("Connection failed: {e}"))
                } else {
                    GeniusError::transport(e.to_string())
                }
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GeniusError::transport(e.to_string()))?;
        let body: Option<Value> = serde_json::from_slice(&bytes).ok();

        check_envelope(status, body.as_ref())?;

        body.ok_or_else(|| GeniusError::decode("response body is not valid JSON"))
    }

    /// Perform a request and decode the `response` part of the envelope.
    pub async fn request_typed<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, GeniusError> {
        let body = self.request(endpoint, params).await?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_value(body).map_err(|e| GeniusError::decode(e.to_string()))?;
        Ok(envelope.response)
    }

    /// `GET /search?q=`
    pub async fn search(&self, query: &str) -> Result<Option<SearchResponse>, GeniusError> {
        self.request_typed("/search", &[("q", query.to_string())])
            .await
    }

    /// `GET /songs/{id}`
    pub async fn song(&self, id: u64) -> Result<Option<SongResponse>, GeniusError> {
        self.request_typed(&format!("/songs/{id}"), &[]).await
    }

    /// `GET /artists/{id}`
    pub async fn artist(&self, id: u64) -> Result<Option<ArtistResponse>, GeniusError> {
        self.request_typed(&format!("/artists/{id}"), &[]).await
    }

    /// `GET /artists/{id}/songs`
    pub async fn artist_songs(
        &self,
        id: u64,
        query: ArtistSongsQuery,
    ) -> Result<Option<ArtistSongsResponse>, GeniusError> {
        self.request_typed(&format!("/artists/{id}/songs"), &query.to_params())
            .await
    }
}

/// Validate the transport status and the embedded `meta.status`.
///
/// Either one signalling failure fails the call. When both are present the
/// embedded status and message win over the transport ones.
pub fn check_envelope(status: StatusCode, body: Option<&Value>) -> Result<(), GeniusError> {
    let meta = body.and_then(|b| b.get("meta"));
    let embedded = meta
        .and_then(|m| m.get("status"))
        .and_then(Value::as_u64)
        .map(|s| u16::try_from(s).unwrap_or(u16::MAX));

    let failed = !status.is_success() || embedded.is_some_and(|s| s >= 400);
    if !failed {
        return Ok(());
    }

    let code = embedded
        .filter(|s| *s >= 400)
        .unwrap_or_else(|| status.as_u16());
    let message = meta
        .and_then(|m| m.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

    Err(GeniusError::api(code, message))
}
