//! Data models for the search service wire format and the client session.
//!
//! - [`Query`] / [`Clause`] - request body sent to the search endpoint
//! - [`ResultPage`] / [`ResultItem`] - one page of search hits
//! - [`StatusResponse`] - index listing returned by the status endpoint
//!
//! Response models decode leniently via the helpers in
//! `parsers::deserializers`: index content is not under our control, so
//! missing, null, numeric or list-valued fields must not fail a whole page.

pub mod query;
pub mod result;
pub mod status;

pub use query::{Clause, Query};
pub use result::{ResultItem, ResultPage};
pub use status::StatusResponse;
