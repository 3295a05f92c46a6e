use serde::{Deserialize, Serialize};

/// Matching strategy of a search request.
///
/// Serialises externally tagged, so `MatchAll {}` becomes
/// `{"match_all":{}}` and `QueryString` becomes `{"query_string":{...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    MatchAll {},
    QueryString { query: String, analyze_wildcard: bool },
}

impl Clause {
    pub fn match_all() -> Self {
        Clause::MatchAll {}
    }

    /// Wildcard substring clause for an already normalised term.
    pub fn wildcard(term: &str) -> Self {
        Clause::QueryString { query: format!("*{}*", term), analyze_wildcard: true }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Clause::MatchAll {})
    }
}

/// Request body for `POST <host>/search/<indices>/_search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub from: usize,
    pub size: usize,
    #[serde(rename = "query")]
    pub clause: Clause,
}

impl Query {
    pub fn new(from: usize, size: usize, clause: Clause) -> Self {
        Self { from, size, clause }
    }

    /// Compact JSON as sent on the wire and echoed in the query display.
    pub fn to_json(&self) -> String {
        // Serialising plain structs and strings into a String cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
