use thiserror::Error;

/// Failures talking to the search service.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid service host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("unexpected {what} shape: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SearchError {
    /// Whether the service could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, SearchError::Transport { .. })
    }
}
