pub mod builder;

pub use builder::{MIN_TERM_CHARS, SearchTerm, build_query};
