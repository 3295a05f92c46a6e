//! HTML fragments of the search widget.
//!
//! The page layout is fixed: a `searchform` holding the index checklist and
//! the `searchterm` box, then `queryDiv` (query echo), `hitsDiv` (hit count,
//! window and pagination) and `outputDiv` (result list). Every fragment here
//! renders the inner HTML of one of those elements. All index-provided text
//! and all attribute values are encoded with [`html_encode`].

use std::fmt::Write;

use super::escape::html_encode;
use super::highlight::highlight_segments;
use crate::models::{Query, ResultItem, ResultPage};
use crate::session::{IndexSelection, OffsetWindow, PaginationControls};

/// Separator between metadata fields under each result.
pub const METADATA_SEPARATOR: &str = " : ";

const PREV_BUTTON: &str = r#"<input value="prev" class="prev" type="button">"#;
const NEXT_BUTTON: &str = r#"<input value="next" class="next" type="button">"#;

/// Inner HTML of the three output elements after a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    pub query_div: String,
    pub hits_div: String,
    pub output_div: String,
}

/// Encode `text`, wrapping occurrences of `term` in `<span class="highlight">`.
pub fn highlight_html(text: &str, term: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in highlight_segments(text, term) {
        if segment.highlighted {
            out.push_str(r#"<span class="highlight">"#);
            out.push_str(&html_encode(segment.text));
            out.push_str("</span>");
        } else {
            out.push_str(&html_encode(segment.text));
        }
    }
    out
}

/// One checkbox per index, with a line break before every third.
pub fn render_index_selection(selection: &IndexSelection) -> String {
    let mut out = String::new();
    for (position, name) in selection.available().iter().enumerate() {
        if position % crate::session::CHECKBOXES_PER_ROW == 0 {
            out.push_str("<br/>");
        }
        let name_attr = html_encode(name);
        let checked = if selection.is_selected(name) { " checked" } else { "" };
        let _ = write!(
            out,
            r#"<label><input type="checkbox" id="{name_attr}" value="{name_attr}"{checked}>{name_attr}</label>"#
        );
    }
    out
}

/// `queryDiv` content: heading plus the encoded query JSON.
pub fn render_query(query: &Query) -> String {
    format!("<h3>Query</h3>{}", html_encode(&query.to_json()))
}

/// `hitsDiv` content: hit count, current window and pagination controls.
pub fn render_hits(total_hits: u64, window: &OffsetWindow, controls: &PaginationControls) -> String {
    let mut out = format!(
        "<b>Treffer: </b>{}<div>{} - {}</div>",
        total_hits,
        window.from(),
        window.to()
    );
    if controls.prev {
        out.push_str(PREV_BUTTON);
    }
    if let Some(jump) = &controls.jump {
        out.push_str(r#"<select class="allSteps" name="allStepsN" size="1">"#);
        for offset in &jump.options {
            let selected = if *offset == jump.selected { " selected" } else { "" };
            let _ = write!(out, r#"<option value="{offset}"{selected}>{offset}</option>"#);
        }
        out.push_str("</select>");
    }
    if controls.next {
        out.push_str(NEXT_BUTTON);
    }
    out
}

/// `outputDiv` content: the ordered result list followed by prev/next buttons.
///
/// Empty when the page has no hits.
pub fn render_output(
    page: &ResultPage,
    window: &OffsetWindow,
    term: &str,
    controls: &PaginationControls,
) -> String {
    if page.is_empty() {
        return String::new();
    }

    let mut out = format!(r#"<ol id="resultList" start="{}">"#, window.from());
    for (position, item) in page.items.iter().enumerate() {
        out.push_str(&render_item(item, position + 1, term));
    }
    out.push_str("</ol>");

    if controls.prev {
        out.push_str(PREV_BUTTON);
    }
    if controls.next {
        out.push_str(NEXT_BUTTON);
    }
    out
}

/// One `<li>`: linked label plus the metadata paragraph (`position` is 1-based).
pub fn render_item(item: &ResultItem, position: usize, term: &str) -> String {
    let id_attr = html_encode(item.id.as_deref().unwrap_or_default());
    let href = html_encode(item.object_url().unwrap_or_default());
    let label = highlight_html(item.label(), term);
    let metadata = highlight_html(&item.metadata_fields().join(METADATA_SEPARATOR), term);

    format!(
        r#"<li id="{id_attr}"><a href="{href}">{label}</a><p class="metadata" id="{position}">{metadata}</p></li>"#
    )
}

/// Render all three output fragments for a received page.
pub fn render_view(query: &Query, page: &ResultPage, window: &OffsetWindow, term: &str) -> SearchView {
    let controls = window.controls(page.total_hits);
    SearchView {
        query_div: render_query(query),
        hits_div: render_hits(page.total_hits, window, &controls),
        output_div: render_output(page, window, term, &controls),
    }
}

/// Standalone document with the full widget layout, for export.
pub fn render_page(selection: &IndexSelection, raw_term: &str, view: &SearchView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
    <meta charset="UTF-8">
    <title>Suche</title>
    <style>.highlight {{ background-color: yellow; }} .metadata {{ color: #666; }}</style>
</head>
<body>
    <div id="searchform">{checklist}</div>
    <input type="text" id="searchterm" value="{term}">
    <textarea id="queryForm">{query_json}</textarea>
    <div id="queryDiv">{query_div}</div>
    <div id="hitsDiv">{hits_div}</div>
    <div id="outputDiv">{output_div}</div>
</body>
</html>
"#,
        checklist = render_index_selection(selection),
        term = html_encode(raw_term),
        query_json = query_json_from_view(view),
        query_div = view.query_div,
        hits_div = view.hits_div,
        output_div = view.output_div,
    )
}

/// The query JSON is already encoded inside `queryDiv` after the heading.
fn query_json_from_view(view: &SearchView) -> &str {
    view.query_div.strip_prefix("<h3>Query</h3>").unwrap_or_default()
}
