use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{Focus, MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::controller::SearchController;
use crate::models::ResultItem;
use crate::render::highlight_segments;
use crate::render::html::METADATA_SEPARATOR;
use crate::utils::sanitize_for_terminal;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);
const MARK: Color = Color::Rgb(250, 204, 21);

/// Everything the UI needs for one frame
pub struct RenderState<'a> {
    pub controller: &'a SearchController,
    pub search_input: &'a str,
    pub focus: Focus,
    pub selected_idx: usize,
    pub index_cursor: usize,
    pub jump_cursor: Option<usize>,
    pub loading: bool,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let rows = state.controller.session().indices.rows();
    let layout = AppLayout::new(frame.area(), rows.len());

    render_index_checklist(frame, layout.indices_area, state, &rows);
    render_search_box(frame, layout.search_area, state);
    render_query(frame, layout.query_area, state.controller);
    render_results_list(frame, layout.results_area, state);

    let selected = state.controller.page().and_then(|page| page.items.get(state.selected_idx));
    render_preview(frame, layout.preview_area, selected, state.controller.highlight_term());
    render_status_bar(frame, layout.status_area, state);

    if let Some(cursor) = state.jump_cursor {
        render_jump_popup(frame, state.controller, cursor);
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)).title(title)
}

fn render_index_checklist(frame: &mut Frame, area: Rect, state: &RenderState, rows: &[Vec<&str>]) {
    let indices = &state.controller.session().indices;
    let focused = state.focus == Focus::Indices;

    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::styled("No indices discovered (Ctrl+R to retry)", Style::default().fg(MUTED))]
    } else {
        let mut position = 0;
        rows.iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|name| {
                        let mark = if indices.is_selected(name) { "[x]" } else { "[ ]" };
                        let mut style = Style::default().fg(BRIGHT);
                        if focused && position == state.index_cursor {
                            style = style.bg(ACCENT).add_modifier(Modifier::BOLD);
                        }
                        position += 1;
                        Span::styled(format!("{} {}  ", mark, sanitize_for_terminal(name)), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(pane_block(" Indices ", focused)), area);
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Search;
    let mut spans = vec![Span::raw(sanitize_for_terminal(state.search_input))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(ACCENT)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(pane_block(" Search ", focused));
    frame.render_widget(paragraph, area);
}

fn render_query(frame: &mut Frame, area: Rect, controller: &SearchController) {
    let text = controller.query().map(|query| query.to_json()).unwrap_or_default();
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(MUTED))
        .block(pane_block(" Query ", false));
    frame.render_widget(paragraph, area);
}

/// Split `text` into spans with every occurrence of `term` marked.
fn highlighted_spans(text: &str, term: &str, base: Style) -> Vec<Span<'static>> {
    highlight_segments(text, term)
        .into_iter()
        .map(|segment| {
            let style = if segment.highlighted {
                base.fg(MARK).add_modifier(Modifier::BOLD)
            } else {
                base
            };
            Span::styled(segment.text.to_string(), style)
        })
        .collect()
}

fn render_results_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let controller = state.controller;
    let term = controller.highlight_term();
    let from = controller.session().window.from();

    let items: Vec<ListItem> = controller
        .page()
        .map(|page| page.items.as_slice())
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == state.selected_idx {
                Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };

            let label = sanitize_for_terminal(item.label());
            let metadata = sanitize_for_terminal(&item.metadata_fields().join(METADATA_SEPARATOR));

            let position = from.saturating_add(idx + 1);
            let mut title = vec![Span::styled(format!("{:>4}. ", position), style)];
            title.extend(highlighted_spans(&label, term, style));
            let mut details = vec![Span::styled("      ", style)];
            details.extend(highlighted_spans(&metadata, term, style));

            ListItem::new(Text::from(vec![Line::from(title), Line::from(details)]))
        })
        .collect();

    let title = match controller.page() {
        Some(page) if page.total_hits > 0 => {
            let last = from.saturating_add(page.items.len());
            format!(" Results {} - {} ", from.saturating_add(1), last)
        }
        _ => " Results ".to_string(),
    };

    let list = List::new(items).block(pane_block(&title, state.focus == Focus::Results));
    frame.render_widget(list, area);
}

fn render_preview(frame: &mut Frame, area: Rect, item: Option<&ResultItem>, term: &str) {
    let content = if let Some(item) = item {
        let field = |name: &'static str, value: Option<&str>| -> Option<Line<'static>> {
            value.map(|v| {
                let mut spans = vec![Span::styled(format!("{}: ", name), Style::default().fg(MUTED))];
                spans.extend(highlighted_spans(&sanitize_for_terminal(v), term, Style::default()));
                Line::from(spans)
            })
        };

        let mut lines: Vec<Line> = [
            field("Title", item.title.as_deref()),
            field("Creator", item.creator.as_deref()),
            field("Year", item.year.as_deref()),
            field("Type", item.item_type.as_deref()),
            field("DDC", item.classification.as_deref()),
            field("ID", item.id.as_deref()),
            field("Aleph", item.external_id.as_deref()),
            field("DOI", item.doi.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        lines.push(Line::from(""));
        lines.extend(
            [
                field("Link", item.object_url()),
                field("Catalog", item.catalog_url.as_deref()),
                field("Thumbnail", item.thumbnail_url.as_deref()),
            ]
            .into_iter()
            .flatten(),
        );

        Text::from(lines)
    } else {
        Text::from("No result selected")
    };

    let paragraph = Paragraph::new(content)
        .block(pane_block(" Preview ", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        let paragraph = Paragraph::new(format!(" {} ", message.text))
            .style(Style::default().fg(fg).bg(BAR_BG));
        frame.render_widget(paragraph, area);
        return;
    }

    let controller = state.controller;
    let mut parts = vec![];
    if state.loading {
        parts.push("Loading…".to_string());
    }

    match controller.page() {
        Some(page) => {
            let window = &controller.session().window;
            let controls = controller.controls();
            parts.push(format!("Treffer: {}", page.total_hits));
            if page.total_hits > 0 {
                parts.push(format!("{} - {}", window.from(), window.to()));
            }
            if controls.prev {
                parts.push("PgUp: prev".to_string());
            }
            if controls.next {
                parts.push("PgDn: next".to_string());
            }
            if controls.jump.is_some() {
                parts.push("Ctrl+G: jump".to_string());
            }
        }
        None => parts.push("Enter: search (* for all)".to_string()),
    }

    parts.push("Tab: focus".to_string());
    parts.push("Ctrl+Y: copy link".to_string());
    parts.push("Ctrl+C: quit".to_string());

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | ")))
        .style(Style::default().fg(BRIGHT).bg(BAR_BG));
    frame.render_widget(paragraph, area);
}

fn render_jump_popup(frame: &mut Frame, controller: &SearchController, cursor: usize) {
    let Some(selector) = controller.controls().jump else {
        return;
    };

    let items: Vec<ListItem> = selector
        .options
        .iter()
        .enumerate()
        .map(|(idx, offset)| {
            let marker = if *offset == selector.selected { "•" } else { " " };
            let style = if idx == cursor {
                Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(BRIGHT)
            };
            ListItem::new(format!("{} {}", marker, offset)).style(style)
        })
        .collect();

    let height = (items.len() as u16).saturating_add(2).min(frame.area().height);
    let area = centered(frame.area(), 20, height);
    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(pane_block(" Jump to ", true)), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    area
}
