//! Copy a result's link target to the system clipboard.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::models::ResultItem;

/// Longest link accepted for copying
const MAX_LINK_BYTES: usize = 8 * 1024;

/// Clipboard seam so the validation path can be tested without a display
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// The link of `item` if it is fit for the clipboard.
///
/// Rejects items without a link, multi-line or control-character links,
/// non-http(s) schemes and oversized values.
pub fn link_for(item: &ResultItem) -> Result<&str> {
    let Some(link) = item.object_url().map(str::trim) else {
        bail!("Result has no link to copy");
    };
    if link.is_empty() {
        bail!("Result has no link to copy");
    }
    if link.len() > MAX_LINK_BYTES {
        bail!("Link too large for clipboard ({} bytes, max {})", link.len(), MAX_LINK_BYTES);
    }
    if link.chars().any(char::is_control) {
        bail!("Link contains control characters");
    }
    let lower = link.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        bail!("Refusing to copy non-http link: {}", link);
    }
    Ok(link)
}

fn copy_with_provider(item: &ResultItem, provider: &mut dyn ClipboardProvider) -> Result<String> {
    let link = link_for(item)?;
    provider.set_text(link)?;
    Ok(link.to_string())
}

/// Copy the link of `item` to the system clipboard and return it.
///
/// Validation runs before the clipboard is opened, so headless environments
/// still get a precise error for bad links.
pub fn copy_link(item: &ResultItem) -> Result<String> {
    link_for(item)?;
    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(item, &mut clipboard)
}
