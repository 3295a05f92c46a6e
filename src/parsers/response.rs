use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::SearchError;
use crate::models::{ResultItem, ResultPage, StatusResponse};

#[derive(Deserialize)]
struct RawSearchResponse {
    hits: RawHits,
}

#[derive(Deserialize)]
struct RawHits {
    #[serde(deserialize_with = "super::deserializers::deserialize_total_hits")]
    total: u64,
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Deserialize)]
struct RawHit {
    #[serde(rename = "_source", default)]
    source: Option<Value>,
}

/// Parse a search endpoint body into a [`ResultPage`].
///
/// Hits whose `_source` cannot be decoded are skipped with a warning.
pub fn parse_search_response(body: &str) -> Result<ResultPage, SearchError> {
    let raw: RawSearchResponse = serde_json::from_str(body)
        .map_err(|source| SearchError::Decode { what: "search response", source })?;

    let mut items = Vec::with_capacity(raw.hits.hits.len());
    let mut skipped = 0;
    for (position, hit) in raw.hits.hits.into_iter().enumerate() {
        let source = hit.source.unwrap_or(Value::Object(Default::default()));
        match serde_json::from_value::<ResultItem>(source) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(position, error = %e, "Skipping undecodable hit.");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(kept = items.len(), skipped, "Search response contained undecodable hits.");
    }

    Ok(ResultPage { total_hits: raw.hits.total, items })
}

/// Parse a status endpoint body into the set of index names.
pub fn parse_status_response(body: &str) -> Result<BTreeSet<String>, SearchError> {
    let status: StatusResponse = serde_json::from_str(body)
        .map_err(|source| SearchError::Decode { what: "status response", source })?;
    Ok(status.index_names())
}
