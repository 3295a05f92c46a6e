//! TUI application state and event handling.
//!
//! The `App` owns a [`SearchController`] and drives it from the keyboard.
//! Network calls run as tokio tasks; their outcomes come back over an
//! unbounded channel and are drained once per loop iteration, so the
//! controller is only ever touched from the event loop.
//!
//! # Keys
//!
//! - Typing edits the search box, Enter submits it
//! - Tab cycles focus: search box, index checklist, result list
//! - Space in the checklist toggles the index under the cursor
//! - PageUp/PageDown page through results, Ctrl+G opens the jump list
//! - Ctrl+Y copies the selected result's link, Ctrl+R re-discovers indices

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::client::SearchClient;
use crate::clipboard::copy_link;
use crate::controller::{SearchController, SearchRequest};
use crate::error::SearchError;
use crate::models::ResultPage;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Search box input limit (characters)
const MAX_INPUT_CHARS: usize = 256;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Indices,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Indices,
            Focus::Indices => Focus::Results,
            Focus::Results => Focus::Search,
        }
    }
}

/// Completed background work
#[derive(Debug)]
pub enum ServiceEvent {
    Indices(Result<BTreeSet<String>, SearchError>),
    Page { id: u64, result: Result<ResultPage, SearchError> },
}

pub struct App {
    controller: SearchController,
    client: SearchClient,
    runtime: Handle,
    events_tx: UnboundedSender<ServiceEvent>,
    events_rx: UnboundedReceiver<ServiceEvent>,
    search_input: String,
    focus: Focus,
    selected_idx: usize,
    index_cursor: usize,
    // Cursor into the jump options while the jump list is open
    jump_cursor: Option<usize>,
    in_flight: usize,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(controller: SearchController, client: SearchClient, runtime: Handle) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            controller,
            client,
            runtime,
            events_tx,
            events_rx,
            search_input: String::new(),
            focus: Focus::Search,
            selected_idx: 0,
            index_cursor: 0,
            jump_cursor: None,
            in_flight: 0,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.discover_indices();

        while !self.should_quit {
            let had_status = self.status_message.is_some();
            self.check_and_clear_expired_status();
            if had_status && self.status_message.is_none() {
                self.needs_redraw = true;
            }

            self.drain_service_events();

            // Redraw when dirty, or every 100ms to pick up terminal resizes
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            controller: &self.controller,
            search_input: &self.search_input,
            focus: self.focus,
            selected_idx: self.selected_idx,
            index_cursor: self.index_cursor,
            jump_cursor: self.jump_cursor,
            loading: self.in_flight > 0,
            status_message: self.status_message.as_ref(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        if self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at) {
            self.status_message = None;
        }
    }

    fn discover_indices(&mut self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            // Receiver gone means the app is shutting down
            let _ = tx.send(ServiceEvent::Indices(client.fetch_indices().await));
        });
    }

    fn dispatch(&mut self, request: Option<SearchRequest>) {
        let Some(SearchRequest { id, indices, query }) = request else {
            return;
        };
        debug!(id, "Dispatching search request.");

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        self.needs_redraw = true;
        self.runtime.spawn(async move {
            let result = client.search(&indices, &query).await;
            let _ = tx.send(ServiceEvent::Page { id, result });
        });
    }

    fn drain_service_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_service_event(event);
        }
    }

    fn handle_service_event(&mut self, event: ServiceEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            ServiceEvent::Indices(result) => {
                if let Err(e) = &result {
                    self.set_status(
                        failure_status("Index discovery failed", e, self.client.host()),
                        MessageType::Error,
                        STATUS_ERROR_DURATION_MS,
                    );
                }
                self.controller.apply_indices(result);
                let count = self.controller.session().indices.available().len();
                self.index_cursor = self.index_cursor.min(count.saturating_sub(1));
            }
            ServiceEvent::Page { id, result } => {
                if let Err(e) = &result {
                    self.set_status(
                        failure_status("Search failed", e, self.client.host()),
                        MessageType::Error,
                        STATUS_ERROR_DURATION_MS,
                    );
                } else {
                    self.selected_idx = 0;
                }
                self.controller.apply_response(id, result);
            }
        }
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.jump_cursor.is_some() {
                    self.jump_cursor = None;
                } else if self.search_input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_input.clear();
                    self.focus = Focus::Search;
                }
                self.needs_redraw = true;
            }
            Action::Submit => self.submit(),
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PrevPage => {
                let request = self.controller.prev();
                self.dispatch(request);
            }
            Action::NextPage => {
                let request = self.controller.next();
                self.dispatch(request);
            }
            Action::OpenJump => self.open_jump(),
            Action::CopyLink => self.copy_selected_link(),
            Action::ToggleFocus => {
                self.focus = self.focus.next();
                self.needs_redraw = true;
            }
            Action::Refresh => self.discover_indices(),
            Action::UpdateSearch(' ') if self.focus == Focus::Indices => self.toggle_index_at_cursor(),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    fn submit(&mut self) {
        if let Some(cursor) = self.jump_cursor.take() {
            let offset = self
                .controller
                .controls()
                .jump
                .and_then(|selector| selector.options.get(cursor).copied());
            if let Some(offset) = offset {
                let request = self.controller.jump(offset);
                self.dispatch(request);
            }
            self.needs_redraw = true;
            return;
        }

        if self.focus == Focus::Indices {
            self.toggle_index_at_cursor();
            return;
        }

        let request = self.controller.search(&self.search_input);
        if request.is_none() {
            self.set_status(
                "✗ Enter at least 2 characters, or * for all",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
        }
        self.dispatch(request);
    }

    fn open_jump(&mut self) {
        match self.controller.controls().jump {
            Some(selector) => {
                let position = selector.options.iter().position(|&o| o == selector.selected);
                self.jump_cursor = Some(position.unwrap_or(0));
                self.needs_redraw = true;
            }
            None => self.set_status("✗ No results to jump in", MessageType::Error, STATUS_ERROR_DURATION_MS),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if let Some(cursor) = self.jump_cursor {
            let total = self.controller.controls().jump.map_or(0, |s| s.options.len());
            self.jump_cursor = Some(step(cursor, delta, total));
        } else if self.focus == Focus::Indices {
            let total = self.controller.session().indices.available().len();
            self.index_cursor = step(self.index_cursor, delta, total);
        } else {
            let total = self.controller.page().map_or(0, |page| page.items.len());
            self.selected_idx = step(self.selected_idx, delta, total);
        }
        self.needs_redraw = true;
    }

    fn toggle_index_at_cursor(&mut self) {
        let name = self.controller.session().indices.available().iter().nth(self.index_cursor).cloned();
        if let Some(name) = name {
            self.controller.toggle_index(&name);
            self.needs_redraw = true;
        }
    }

    fn copy_selected_link(&mut self) {
        let item = self.controller.page().and_then(|page| page.items.get(self.selected_idx));
        let Some(item) = item else {
            self.set_status("✗ No result selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match copy_link(item) {
            Ok(link) => self.set_status(
                format!("✓ Copied {}", link),
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn update_search(&mut self, c: char) {
        if self.search_input.chars().count() < MAX_INPUT_CHARS {
            self.search_input.push(c);
            self.focus = Focus::Search;
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.needs_redraw = true;
        }
    }
}

/// Status line for a failed request; unreachable services name the host.
fn failure_status(action: &str, error: &SearchError, host: &str) -> String {
    if error.is_transport() {
        format!("✗ {}: search service at {} unreachable", action, host)
    } else {
        format!("✗ {}: {}", action, error)
    }
}

/// Move `current` by `delta`, clamped to `0..total`.
fn step(current: usize, delta: isize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(total - 1)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use tokio::runtime::Runtime;

    use super::*;
    use crate::models::ResultItem;
    use crate::session::SearchSession;

    // Nothing listens on the discard port, so spawned requests fail fast
    // and are never drained unless a test asks for it.
    fn create_app(runtime: &Runtime) -> App {
        let session = SearchSession::new("http://127.0.0.1:9", NonZeroUsize::new(10).unwrap());
        let controller = SearchController::new(session, vec!["edoweb".to_string()]);
        let client = SearchClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let mut app = App::new(controller, client, runtime.handle().clone());
        app.handle_service_event(ServiceEvent::Indices(Ok(
            ["edoweb", "ellinet", "frl"].iter().map(|s| s.to_string()).collect(),
        )));
        app
    }

    fn page(total_hits: u64, count: usize) -> ResultPage {
        let items = (0..count)
            .map(|i| ResultItem {
                id: Some(format!("edoweb:{}", i)),
                title: Some(format!("Title {}", i)),
                ..Default::default()
            })
            .collect();
        ResultPage { total_hits, items }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(Action::UpdateSearch(c));
        }
    }

    #[test]
    fn test_app_new_initializes_state() {
        let runtime = Runtime::new().unwrap();
        let app = create_app(&runtime);

        assert_eq!(app.selected_idx, 0);
        assert_eq!(app.search_input, "");
        assert_eq!(app.focus, Focus::Search);
        assert!(!app.should_quit);
        assert!(app.controller.session().indices.is_selected("edoweb"));
    }

    #[test]
    fn test_submit_issues_request() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "Cat");
        app.handle_action(Action::Submit);

        assert_eq!(app.in_flight, 1);
        assert!(app.controller.view().query_div.contains("*cat*"));
    }

    #[test]
    fn test_submit_short_term_sets_error_status() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "c");
        app.handle_action(Action::Submit);

        assert_eq!(app.in_flight, 0);
        assert!(app.controller.query().is_none());
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.message_type, MessageType::Error);
    }

    #[test]
    fn test_page_response_resets_selection() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "cat");
        app.handle_action(Action::Submit);
        app.selected_idx = 3;
        app.handle_service_event(ServiceEvent::Page { id: 1, result: Ok(page(25, 10)) });

        assert_eq!(app.selected_idx, 0);
        assert_eq!(app.in_flight, 0);
        assert_eq!(app.controller.page().unwrap().total_hits, 25);
    }

    #[test]
    fn test_failed_page_keeps_previous_results() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "cat");
        app.handle_action(Action::Submit);
        app.handle_service_event(ServiceEvent::Page { id: 1, result: Ok(page(25, 10)) });
        app.handle_action(Action::NextPage);
        let error = SearchError::Status { url: "u".into(), status: 500, body: String::new() };
        app.handle_service_event(ServiceEvent::Page { id: 2, result: Err(error) });

        assert_eq!(app.controller.page().unwrap().items.len(), 10);
        assert_eq!(app.status_message.as_ref().unwrap().message_type, MessageType::Error);
    }

    #[test]
    fn test_next_and_prev_pages() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "cat");
        app.handle_action(Action::Submit);
        app.handle_service_event(ServiceEvent::Page { id: 1, result: Ok(page(25, 10)) });

        app.handle_action(Action::NextPage);
        assert_eq!(app.controller.session().window.from(), 10);
        app.handle_action(Action::PrevPage);
        assert_eq!(app.controller.session().window.from(), 0);
        // Nothing before the first page
        app.handle_action(Action::PrevPage);
        assert_eq!(app.controller.session().window.from(), 0);
    }

    #[test]
    fn test_jump_list_selects_offset() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "cat");
        app.handle_action(Action::Submit);
        app.handle_service_event(ServiceEvent::Page { id: 1, result: Ok(page(25, 10)) });

        app.handle_action(Action::OpenJump);
        assert_eq!(app.jump_cursor, Some(0));
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.jump_cursor, Some(2));

        app.handle_action(Action::Submit);
        assert_eq!(app.jump_cursor, None);
        assert_eq!(app.controller.session().window.from(), 20);
    }

    #[test]
    fn test_open_jump_without_results() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        app.handle_action(Action::OpenJump);
        assert_eq!(app.jump_cursor, None);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_escape_closes_jump_before_quitting() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "cat");
        app.handle_action(Action::Submit);
        app.handle_service_event(ServiceEvent::Page { id: 1, result: Ok(page(25, 10)) });
        app.handle_action(Action::OpenJump);

        app.handle_action(Action::ClearSearch);
        assert_eq!(app.jump_cursor, None);
        assert!(!app.should_quit);

        app.handle_action(Action::ClearSearch);
        assert_eq!(app.search_input, "");
        assert!(!app.should_quit);

        app.handle_action(Action::ClearSearch);
        assert!(app.should_quit);
    }

    #[test]
    fn test_space_toggles_index_in_checklist() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        app.handle_action(Action::ToggleFocus);
        assert_eq!(app.focus, Focus::Indices);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::UpdateSearch(' '));

        assert!(app.controller.session().indices.is_selected("ellinet"));
        assert_eq!(app.search_input, "");

        app.handle_action(Action::Submit);
        assert!(!app.controller.session().indices.is_selected("ellinet"));
    }

    #[test]
    fn test_space_in_search_box_is_input() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "a b");
        assert_eq!(app.search_input, "a b");
    }

    #[test]
    fn test_typing_returns_focus_to_search() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        app.handle_action(Action::ToggleFocus);
        app.handle_action(Action::ToggleFocus);
        assert_eq!(app.focus, Focus::Results);

        app.handle_action(Action::UpdateSearch('x'));
        assert_eq!(app.focus, Focus::Search);
    }

    #[test]
    fn test_move_selection_clamped() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, "cat");
        app.handle_action(Action::Submit);
        app.handle_service_event(ServiceEvent::Page { id: 1, result: Ok(page(3, 3)) });

        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.selected_idx, 2);

        app.handle_action(Action::MoveUp);
        assert_eq!(app.selected_idx, 1);
    }

    #[test]
    fn test_search_input_limit() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        type_text(&mut app, &"a".repeat(300));
        assert_eq!(app.search_input.chars().count(), MAX_INPUT_CHARS);

        app.handle_action(Action::DeleteChar);
        assert_eq!(app.search_input.chars().count(), MAX_INPUT_CHARS - 1);
    }

    #[test]
    fn test_copy_link_without_results() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        app.handle_action(Action::CopyLink);
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.message_type, MessageType::Error);
        assert!(status.text.contains("No result"));
    }

    #[test]
    fn test_discovery_failure_reports_status() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        let error = SearchError::InvalidHost { host: "x".into(), reason: "bad".into() };
        app.handle_service_event(ServiceEvent::Indices(Err(error)));

        assert!(app.status_message.as_ref().unwrap().text.contains("Index discovery failed"));
        // Previous checklist survives
        assert_eq!(app.controller.session().indices.available().len(), 3);
    }

    #[test]
    fn test_unreachable_service_names_host() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        let error = runtime.block_on(app.client.fetch_indices()).unwrap_err();
        assert!(error.is_transport());
        app.handle_service_event(ServiceEvent::Indices(Err(error)));

        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.message_type, MessageType::Error);
        assert_eq!(
            status.text,
            "✗ Index discovery failed: search service at http://127.0.0.1:9 unreachable"
        );
    }

    #[test]
    fn test_status_error_keeps_service_message() {
        let error = SearchError::Status { url: "u".into(), status: 503, body: "busy".into() };
        let text = failure_status("Search failed", &error, "http://localhost");
        assert!(text.starts_with("✗ Search failed: "));
        assert!(text.contains("503"));
        assert!(!text.contains("unreachable"));
    }

    #[test]
    fn test_expired_status_is_cleared() {
        let runtime = Runtime::new().unwrap();
        let mut app = create_app(&runtime);

        app.set_status("old", MessageType::Success, 0);
        app.check_and_clear_expired_status();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, 1, 5), 3);
        assert_eq!(step(3, 1, 0), 0);
    }
}
