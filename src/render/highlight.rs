//! Case-insensitive term highlighting.
//!
//! Matching works on the raw text, before any encoding, so a term can never
//! match inside markup or an entity. The HTML renderer and the terminal UI
//! both consume the resulting [`Segment`]s.

use std::ops::Range;

/// A run of text, flagged when it matched the highlight term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Split `text` into plain and highlighted runs for `term`.
///
/// An empty term yields the whole text as one plain segment.
pub fn highlight_segments<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for range in find_matches(text, term) {
        if range.start > cursor {
            segments.push(Segment { text: &text[cursor..range.start], highlighted: false });
        }
        segments.push(Segment { text: &text[range.clone()], highlighted: true });
        cursor = range.end;
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(Segment { text: &text[cursor..], highlighted: false });
    }
    segments
}

/// Non-overlapping byte ranges of case-insensitive occurrences of `term`.
fn find_matches(text: &str, term: &str) -> Vec<Range<usize>> {
    let mut matches = Vec::new();
    if term.is_empty() {
        return matches;
    }

    let mut start = 0;
    while start < text.len() {
        match match_at(&text[start..], term) {
            Some(len) => {
                matches.push(start..start + len);
                start += len;
            }
            None => {
                start += text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    matches
}

/// Byte length of `haystack`'s prefix that equals `term` ignoring case.
fn match_at(haystack: &str, term: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut hay = haystack.chars();
    for wanted in term.chars() {
        let found = hay.next()?;
        if !found.to_lowercase().eq(wanted.to_lowercase()) {
            return None;
        }
        consumed += found.len_utf8();
    }
    Some(consumed)
}
