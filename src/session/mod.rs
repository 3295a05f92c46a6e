//! Per-controller search session: service host, offset window and index selection.

pub mod indices;
pub mod window;

use std::num::NonZeroUsize;

pub use indices::{CHECKBOXES_PER_ROW, IndexSelection};
pub use window::{JumpSelector, MAX_JUMP_OPTIONS, OffsetWindow, PaginationControls};

/// State that lives for as long as one search front-end does.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub host: String,
    pub window: OffsetWindow,
    pub indices: IndexSelection,
}

impl SearchSession {
    pub fn new(host: impl Into<String>, page_size: NonZeroUsize) -> Self {
        Self {
            host: host.into(),
            window: OffsetWindow::new(page_size),
            indices: IndexSelection::default(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.window.page_size()
    }
}
