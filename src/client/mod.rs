//! HTTP client for the search service.
//!
//! Two endpoints are used:
//!
//! - `GET  <host>/search/_status` for index discovery
//! - `POST <host>/search/<a,b>/_search` with a JSON [`Query`] body
//!
//! Failures are returned as [`SearchError`]; callers decide whether to log
//! or report them. Nothing here retries.

use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::models::{Query, ResultPage};
use crate::parsers::{parse_search_response, parse_status_response};
use crate::utils::url::{search_path, status_path};

/// Longest error body kept in [`SearchError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Async client bound to one service host. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    host: String,
}

impl SearchClient {
    /// Create a client for `host` (e.g. `http://localhost`). A missing scheme defaults to http.
    pub fn new(host: &str, timeout: Duration) -> Result<Self, SearchError> {
        let host = normalize_host(host)?;
        let http = reqwest::Client::builder().timeout(timeout).build().map_err(|source| {
            warn!(error = %source, "Failed to build search HTTP client.");
            SearchError::Transport { url: host.clone(), source }
        })?;
        Ok(Self { http, host })
    }

    /// Normalised host without trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn status_url(&self) -> String {
        format!("{}{}", self.host, status_path())
    }

    pub fn search_url<I, S>(&self, indices: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        format!("{}{}", self.host, search_path(indices))
    }

    /// Discover the index names the service offers.
    pub async fn fetch_indices(&self) -> Result<BTreeSet<String>, SearchError> {
        let url = self.status_url();
        debug!(%url, "Sending status request.");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| SearchError::Transport { url: url.clone(), source })?;
        let body = read_success_body(&url, response).await?;
        let indices = parse_status_response(&body)?;
        debug!(count = indices.len(), "Received index listing.");
        Ok(indices)
    }

    /// Run `query` against `indices`.
    pub async fn search<I, S>(&self, indices: I, query: &Query) -> Result<ResultPage, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = indices.into_iter().map(|s| s.as_ref().to_string()).collect();
        if names.is_empty() {
            warn!("No index selected; searching without an index list.");
        }
        let url = self.search_url(&names);
        let body = query.to_json();
        debug!(%url, query = %body, "Sending search request.");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| SearchError::Transport { url: url.clone(), source })?;
        let body = read_success_body(&url, response).await?;
        let page = parse_search_response(&body)?;
        debug!(total_hits = page.total_hits, items = page.items.len(), "Received search response.");
        Ok(page)
    }
}

async fn read_success_body(url: &str, response: reqwest::Response) -> Result<String, SearchError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| SearchError::Transport { url: url.to_string(), source })?;

    if !status.is_success() {
        warn!(%url, %status, "Search service returned an error status.");
        return Err(SearchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }
    Ok(body)
}

fn normalize_host(host: &str) -> Result<String, SearchError> {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(SearchError::InvalidHost {
            host: host.to_string(),
            reason: "host is empty".to_string(),
        });
    }

    let with_scheme =
        if trimmed.contains("://") { trimmed.to_string() } else { format!("http://{}", trimmed) };

    let url = Url::parse(&with_scheme)
        .map_err(|e| SearchError::InvalidHost { host: host.to_string(), reason: e.to_string() })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SearchError::InvalidHost {
            host: host.to_string(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SearchError::InvalidHost {
            host: host.to_string(),
            reason: "host must not carry a query or fragment".to_string(),
        });
    }

    Ok(with_scheme)
}
