//! Front-end independent search controller.
//!
//! The controller owns the [`SearchSession`] and turns user actions into
//! [`SearchRequest`]s. It never performs I/O: the front-end executes the
//! request with a [`SearchClient`](crate::client::SearchClient) and hands
//! the outcome back through [`SearchController::apply_response`]. State is
//! therefore only mutated from whichever loop owns the controller.
//!
//! # Flow
//!
//! ```text
//! search("cat") ──▶ SearchRequest{id, indices, query} ──▶ client.search(..)
//!                                                              │
//! view() ◀── apply_response(id, Result<ResultPage>) ◀──────────┘
//! ```
//!
//! Responses are applied in arrival order. A response older than the latest
//! request still replaces the page; this is only logged. When the latest
//! request fails, the window moves back to the page still on display.

use std::collections::BTreeSet;

use tracing::{debug, error, info, warn};

use crate::error::SearchError;
use crate::models::{Query, ResultPage};
use crate::query::SearchTerm;
use crate::render::html::{SearchView, render_index_selection, render_query, render_view};
use crate::session::{OffsetWindow, PaginationControls, SearchSession};

/// A query ready to be sent, tagged with a sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    pub indices: Vec<String>,
    pub query: Query,
}

#[derive(Debug)]
pub struct SearchController {
    session: SearchSession,
    default_indices: Vec<String>,
    submitted: Option<SearchTerm>,
    query: Option<Query>,
    page: Option<ResultPage>,
    /// Window the current `page` was rendered at.
    displayed_window: OffsetWindow,
    view: SearchView,
    last_request_id: u64,
}

impl SearchController {
    /// `default_indices` are ticked once discovery reports them.
    pub fn new(session: SearchSession, default_indices: Vec<String>) -> Self {
        Self {
            displayed_window: session.window,
            session,
            default_indices,
            submitted: None,
            query: None,
            page: None,
            view: SearchView::default(),
            last_request_id: 0,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Query currently shown in the query display.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Last page received.
    pub fn page(&self) -> Option<&ResultPage> {
        self.page.as_ref()
    }

    /// HTML fragments for the current state.
    pub fn view(&self) -> &SearchView {
        &self.view
    }

    /// Term to highlight in results of the last submitted search.
    pub fn highlight_term(&self) -> &str {
        self.submitted.as_ref().map_or("", SearchTerm::highlight)
    }

    /// Pagination controls for the last received page.
    pub fn controls(&self) -> PaginationControls {
        self.page
            .as_ref()
            .map(|page| self.session.window.controls(page.total_hits))
            .unwrap_or_default()
    }

    /// Checklist HTML for the `searchform` element.
    pub fn index_selection_html(&self) -> String {
        render_index_selection(&self.session.indices)
    }

    /// Handle the outcome of index discovery.
    pub fn apply_indices(&mut self, result: Result<BTreeSet<String>, SearchError>) {
        match result {
            Ok(names) => {
                info!(count = names.len(), "Discovered indices.");
                self.session.indices.set_available(names);
                self.session.indices.preselect(&self.default_indices);
            }
            Err(e) => error!(error = %e, "Index discovery failed."),
        }
    }

    /// Flip one index checkbox. Returns the new checked state.
    pub fn toggle_index(&mut self, name: &str) -> bool {
        self.session.indices.toggle(name)
    }

    /// Start a new search from the first page.
    ///
    /// Returns `None`, leaving all state untouched, when the term is too short.
    pub fn search(&mut self, raw: &str) -> Option<SearchRequest> {
        self.search_page(raw, 0)
    }

    /// Start a new search on the zero-based `page`.
    ///
    /// Also `None` when `page` lies beyond any addressable offset.
    pub fn search_page(&mut self, raw: &str, page: usize) -> Option<SearchRequest> {
        let term = SearchTerm::parse(raw);
        if term.clause().is_none() {
            debug!(term = %raw, "Search term too short; no request issued.");
            return None;
        }
        let Some(window) = OffsetWindow::at_page(self.session.window.page_size_nonzero(), page)
        else {
            warn!(page, "Page out of range; no request issued.");
            return None;
        };

        self.session.window = window;
        self.submitted = Some(term);
        self.issue()
    }

    /// Previous page, if there is one.
    pub fn prev(&mut self) -> Option<SearchRequest> {
        if self.submitted.is_none() || !self.session.window.prev() {
            return None;
        }
        self.issue()
    }

    /// Next page, if the last response showed one.
    pub fn next(&mut self) -> Option<SearchRequest> {
        let total = self.page.as_ref()?.total_hits;
        if self.submitted.is_none() || !self.session.window.next(total) {
            return None;
        }
        self.issue()
    }

    /// Jump to one of the offsets offered by the jump selector.
    pub fn jump(&mut self, offset: usize) -> Option<SearchRequest> {
        let total = self.page.as_ref()?.total_hits;
        if self.submitted.is_none() || !self.session.window.jump(offset, total) {
            return None;
        }
        self.issue()
    }

    /// Apply a search response.
    ///
    /// Errors are logged and leave the view as it was. A failure of the latest
    /// request also moves the window back to the displayed page, so paging
    /// continues from what the user sees.
    pub fn apply_response(&mut self, id: u64, result: Result<ResultPage, SearchError>) {
        if id < self.last_request_id {
            warn!(id, latest = self.last_request_id, "Applying response of a superseded request.");
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                error!(id, error = %e, "Search request failed.");
                if id == self.last_request_id {
                    self.session.window = self.displayed_window;
                }
                return;
            }
        };

        if let Some(query) = &self.query {
            self.view = render_view(query, &page, &self.session.window, self.highlight_term());
        }
        debug!(id, total_hits = page.total_hits, "Search response applied.");
        self.displayed_window = self.session.window;
        self.page = Some(page);
    }

    /// Build the request for the submitted term at the current window.
    fn issue(&mut self) -> Option<SearchRequest> {
        let clause = self.submitted.as_ref()?.clause()?;
        let query = Query::new(self.session.window.from(), self.session.page_size(), clause);

        self.view.query_div = render_query(&query);
        self.query = Some(query.clone());
        self.last_request_id += 1;

        let indices: Vec<String> = self.session.indices.selected().iter().cloned().collect();
        debug!(
            id = self.last_request_id,
            from = query.from,
            indices = indices.len(),
            "Issuing search request."
        );
        Some(SearchRequest { id: self.last_request_id, indices, query })
    }
}
