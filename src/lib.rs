//! ellinet-search - query an Ellinet/regal search index over HTTP
//!
//! The crate discovers the indices a search service offers, turns a user's
//! term into a wildcard `query_string` query, pages through the hits and
//! renders them either as the HTML fragments of the search widget or in a
//! terminal UI. It provides:
//!
//! - [`build_query`]: term normalisation and query construction
//! - [`SearchClient`]: the async status and search endpoints
//! - [`SearchController`]: front-end independent session state and paging
//! - [`render`]: HTML escaping, highlighting and fragment rendering
//!
//! # Example
//!
//! ```no_run
//! use std::num::NonZeroUsize;
//! use std::time::Duration;
//!
//! use ellinet_search::{SearchClient, SearchController, SearchSession};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = SearchClient::new("http://localhost", Duration::from_secs(30))?;
//! let session = SearchSession::new(client.host(), NonZeroUsize::new(10).unwrap());
//! let mut controller = SearchController::new(session, vec!["edoweb".into()]);
//!
//! controller.apply_indices(client.fetch_indices().await);
//! if let Some(request) = controller.search("cat") {
//!     let result = client.search(&request.indices, &request.query).await;
//!     controller.apply_response(request.id, result);
//! }
//! println!("{}", controller.view().output_div);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod query;
pub mod render;
pub mod session;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use client::SearchClient;
pub use controller::{SearchController, SearchRequest};
pub use error::SearchError;
pub use models::{Query, ResultItem, ResultPage};
pub use query::{SearchTerm, build_query};
pub use session::SearchSession;
