//! JSON-over-HTTP client for the catalog API.
//!
//! Features:
//! - One fixed timeout per call (connect + body); a timeout is reported as
//!   [`ApiError::Timeout`] and handled like any other fetch failure
//! - Brotli/Gzip compression (auto-negotiated)
//! - Body decoded with `serde_json` so malformed payloads carry their URL
//! - Paths are built from segments; each one is percent-encoded, so ids
//!   containing `/`, `?` or `#` never reach another endpoint

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Thin wrapper over [`reqwest::Client`] bound to an API root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for `base_url` with the given per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/');
        let base = match Url::parse(base_url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => return Err(ApiError::BaseUrl(base_url.to_string())),
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("epika/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .use_rustls_tls()
            .connect_timeout(timeout)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Absolute URL for an API path given as segments, e.g.
    /// `["products", id, "videos", "playlist"]`. Each segment is
    /// percent-encoded; empty, `.` and `..` segments are rejected.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || matches!(**s, "." | ".."))
        {
            return Err(ApiError::PathSegment((*bad).to_string()));
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::BaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET {base}/{segments}?{query}` and decode the JSON body as `T`.
    #[instrument(skip_all, fields(path = %segments.join("/")))]
    pub async fn get_json<T>(&self, segments: &[&str], query: &[(&str, String)]) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let endpoint = self.endpoint(segments)?;
        let url = endpoint.to_string();
        debug!(?query, "GET");

        let resp = self
            .client
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| self.classify(&url, e))?;
        debug!(status = %status, bytes = body.len(), "Response received");

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            ApiError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }
}
