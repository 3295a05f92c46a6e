//! Offset window arithmetic and the pagination controls derived from it.
//!
//! The window is `[from, to)` with `to = from + page_size`. `from` only ever
//! moves by whole pages, or jumps to a page start below the hit count, so it
//! stays a non-negative multiple of the page size.
//!
//! Hit counts come from the service and may be arbitrarily large. The jump
//! selector therefore lists at most [`MAX_JUMP_OPTIONS`] page starts around
//! the current page, while [`OffsetWindow::jump`] accepts any page start.

use std::num::NonZeroUsize;

/// Most page starts listed in one jump selector.
pub const MAX_JUMP_OPTIONS: usize = 100;

/// Current `[from, to)` window over the ranked results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetWindow {
    from: usize,
    page_size: NonZeroUsize,
}

impl OffsetWindow {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { from: 0, page_size }
    }

    /// Window positioned on the zero-based `page`.
    ///
    /// `None` when the window end would not fit in a `usize`.
    pub fn at_page(page_size: NonZeroUsize, page: usize) -> Option<Self> {
        let from = page.checked_mul(page_size.get())?;
        from.checked_add(page_size.get())?;
        Some(Self { from, page_size })
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.from.saturating_add(self.page_size.get())
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn page_size_nonzero(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Back to the first page (a fresh search).
    pub fn reset(&mut self) {
        self.from = 0;
    }

    pub fn has_prev(&self) -> bool {
        self.from > 0
    }

    pub fn has_next(&self, total_hits: u64) -> bool {
        let total = hit_count(total_hits);
        total > self.page_size() && self.to() < total
    }

    /// Step back one page. Returns false when already on the first page.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.from = self.from.saturating_sub(self.page_size());
        true
    }

    /// Step forward one page. Returns false when no further page exists.
    pub fn next(&mut self, total_hits: u64) -> bool {
        if !self.has_next(total_hits) {
            return false;
        }
        // has_next guarantees from + page_size < total
        self.from += self.page_size();
        true
    }

    /// Jump to `offset` if it is a page start the jump selector can offer.
    pub fn jump(&mut self, offset: usize, total_hits: u64) -> bool {
        let Some(last) = last_page_start(self.page_size(), hit_count(total_hits)) else {
            return false;
        };
        if offset % self.page_size() != 0 || offset > last {
            return false;
        }
        self.from = offset;
        true
    }

    /// Controls to show for a page of `total_hits` results at this window.
    pub fn controls(&self, total_hits: u64) -> PaginationControls {
        if total_hits == 0 {
            return PaginationControls::default();
        }

        let options = jump_options(self.page_size(), hit_count(total_hits), self.from);
        let jump = if options.is_empty() {
            None
        } else {
            Some(JumpSelector { options, selected: self.from })
        };

        PaginationControls { prev: self.has_prev(), jump, next: self.has_next(total_hits) }
    }
}

/// Hit count as `usize`, saturating on narrow targets.
fn hit_count(total_hits: u64) -> usize {
    usize::try_from(total_hits).unwrap_or(usize::MAX)
}

/// Start of the trailing page, or `None` when everything fits on one page.
fn last_page_start(page_size: usize, total: usize) -> Option<usize> {
    if page_size >= total {
        return None;
    }
    Some((total - 1) / page_size * page_size)
}

/// Page starts `s` with `s + page_size < total`, plus the trailing page start,
/// limited to [`MAX_JUMP_OPTIONS`] entries around the page at `from`.
///
/// Empty when everything fits on one page.
fn jump_options(page_size: usize, total: usize, from: usize) -> Vec<usize> {
    let Some(last) = last_page_start(page_size, total) else {
        return Vec::new();
    };

    let last_page = last / page_size;
    let current = (from / page_size).min(last_page);
    let first = current.saturating_sub(MAX_JUMP_OPTIONS / 2);
    let end = last_page.min(first.saturating_add(MAX_JUMP_OPTIONS - 1));
    let first = first.min(end.saturating_sub(MAX_JUMP_OPTIONS - 1));

    (first..=end).map(|page| page * page_size).collect()
}

/// Jump-to-offset selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpSelector {
    pub options: Vec<usize>,
    /// Currently displayed offset.
    pub selected: usize,
}

/// Which pagination controls a rendered page offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationControls {
    pub prev: bool,
    pub jump: Option<JumpSelector>,
    pub next: bool,
}

impl PaginationControls {
    pub fn is_empty(&self) -> bool {
        !self.prev && !self.next && self.jump.is_none()
    }
}
