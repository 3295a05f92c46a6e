//! Parsers for search service response bodies
//!
//! # Error Handling Strategy
//!
//! Response bodies come from an index whose content we do not control, so
//! parsing degrades gracefully:
//!
//! - **Envelope failures**: a body that is not JSON, or lacks the `hits` /
//!   `hits.total` envelope, is a [`SearchError::Decode`](crate::SearchError::Decode).
//!
//! - **Individual hit failures**: a hit whose `_source` is not an object is
//!   logged at `warn` level and skipped; the remaining hits still render.
//!
//! - **Field tolerance**: text fields accept strings, numbers, booleans and
//!   lists (see [`deserializers`]), so odd documents do not cost a whole page.

pub mod deserializers;
pub mod response;

pub use response::{parse_search_response, parse_status_response};
