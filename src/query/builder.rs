//! Search-box term interpretation and query construction.
//!
//! # Rules
//!
//! ```text
//! "***"      -> match_all                       (wildcard-only, any length)
//! "*Cat*"    -> query_string "*cat*"            (strip outer '*', lower-case, re-wrap)
//! "**a"      -> nothing                          (fewer than MIN_TERM_CHARS left)
//! ```
//!
//! Surrounding whitespace is ignored. Inner wildcards are kept, so `"ca*t"`
//! becomes `"*ca*t*"` and is left to the service's wildcard analysis.
//!
//! # Examples
//!
//! ```rust
//! # use ellinet_search::query::build_query;
//! # use ellinet_search::models::Clause;
//! let query = build_query("Cat", 0, 10).unwrap();
//! assert_eq!(query.clause, Clause::wildcard("cat"));
//!
//! assert!(build_query("*", 30, 10).unwrap().clause.is_match_all());
//! assert!(build_query("a", 0, 10).is_none());
//! ```

use crate::models::{Clause, Query};

/// Shortest stripped term that produces a substring query.
pub const MIN_TERM_CHARS: usize = 2;

const WILDCARD: char = '*';

/// A search-box value classified for query construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Only wildcard characters: the user wants every document.
    MatchAll,
    /// A usable substring term, outer wildcards stripped, original casing kept.
    Substring(String),
    /// Too short once wildcards are stripped; no query is issued.
    TooShort(String),
}

impl SearchTerm {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c == WILDCARD) {
            return SearchTerm::MatchAll;
        }

        let stripped = trimmed.trim_start_matches(WILDCARD).trim_end_matches(WILDCARD);
        if stripped.chars().count() >= MIN_TERM_CHARS {
            SearchTerm::Substring(stripped.to_string())
        } else {
            SearchTerm::TooShort(stripped.to_string())
        }
    }

    /// Clause for this term, if one should be sent.
    pub fn clause(&self) -> Option<Clause> {
        match self {
            SearchTerm::MatchAll => Some(Clause::match_all()),
            SearchTerm::Substring(term) => Some(Clause::wildcard(&term.to_lowercase())),
            SearchTerm::TooShort(_) => None,
        }
    }

    /// Text to highlight in rendered results. Empty for match-all.
    pub fn highlight(&self) -> &str {
        match self {
            SearchTerm::MatchAll => "",
            SearchTerm::Substring(term) | SearchTerm::TooShort(term) => term,
        }
    }
}

/// Build the query for a raw search-box value at the given offset.
///
/// Returns `None` when the term is too short to search for.
pub fn build_query(raw: &str, from: usize, size: usize) -> Option<Query> {
    SearchTerm::parse(raw).clause().map(|clause| Query::new(from, size, clause))
}
