//! Terminal output sanitization
//!
//! # Security: Terminal Injection Prevention
//!
//! Result documents come from the search index and may contain escape
//! sequences. Printed raw, they could clear the screen, move the cursor,
//! retitle the window (OSC) or smuggle hyperlinks. Everything the CLI or the
//! interactive front-end prints from a [`ResultItem`](crate::models::ResultItem)
//! goes through [`sanitize_for_terminal`] first, the terminal counterpart of
//! HTML-encoding for the page.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strips escape sequences and control characters, flattening line breaks.
///
/// - CSI sequences (`ESC [ ... final`) are removed
/// - OSC sequences (`ESC ] ... BEL` or `ESC ] ... ESC \`) are removed
/// - other two-character escapes (`ESC x`) are removed
/// - tab, newline and carriage return become a single space
/// - remaining control characters are dropped
///
/// # Examples
///
/// ```
/// use ellinet_search::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mRot\x1b[0m"), "Rot");
/// assert_eq!(sanitize_for_terminal("Zeile 1\nZeile 2"), "Zeile 1 Zeile 2");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                Some('[') => {
                    // Parameters and intermediates run until a final byte in '@'..='~'
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        match ch {
            '\t' | '\n' | '\r' => {
                if !result.ends_with(' ') {
                    result.push(' ');
                }
            }
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}
