//! Rendering of search state into the widget's HTML fragments.
//!
//! - [`escape`] - HTML encoding and decoding of untrusted text
//! - [`highlight`] - case-insensitive term matching shared with the terminal UI
//! - [`html`] - the `searchform` / `queryDiv` / `hitsDiv` / `outputDiv` fragments

pub mod escape;
pub mod highlight;
pub mod html;

pub use escape::{html_decode, html_encode};
pub use highlight::{Segment, highlight_segments};
pub use html::{SearchView, highlight_html, render_index_selection, render_page, render_view};
