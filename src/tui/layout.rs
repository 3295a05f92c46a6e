use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas, top to bottom, mirroring the search page
pub struct AppLayout {
    pub indices_area: Rect,
    pub search_area: Rect,
    pub query_area: Rect,
    pub results_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Index checklist: one row per checkbox row plus borders
    /// - Search box and query echo: 3 rows each
    /// - Results (60%) beside the item preview (40%)
    /// - Status bar: bottom row
    pub fn new(area: Rect, checklist_rows: usize) -> Self {
        let checklist_height = (checklist_rows.max(1) as u16).saturating_add(2);

        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(checklist_height),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[3]);

        Self {
            indices_area: vertical_chunks[0],
            search_area: vertical_chunks[1],
            query_area: vertical_chunks[2],
            results_area: horizontal_chunks[0],
            preview_area: horizontal_chunks[1],
            status_area: vertical_chunks[4],
        }
    }
}
