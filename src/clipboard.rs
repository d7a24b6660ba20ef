//! Clipboard seam backed by the `arboard` crate.
//!
//! The copy action is best-effort and fire-and-forget: a failed write is
//! logged and otherwise invisible to the caller.  [`SystemClipboard`] creates
//! a short-lived [`arboard::Clipboard`] handle per call rather than sharing
//! one, because `arboard::Clipboard` is not `Send` on all platforms and the
//! handle is cheap to create.

use arboard::Clipboard;

// ---------------------------------------------------------------------------
// ClipboardProvider trait
// ---------------------------------------------------------------------------

/// Interface for writing text to the system clipboard.
///
/// No failure is surfaced to callers; implementations handle (or ignore)
/// errors internally.
pub trait ClipboardProvider {
    /// Write `text` to the clipboard, replacing whatever was there.
    fn write_text(&self, text: &str);
}

// ---------------------------------------------------------------------------
// SystemClipboard
// ---------------------------------------------------------------------------

/// Production clipboard backed by `arboard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn write_text(&self, text: &str) {
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    log::warn!("clipboard: write failed: {e}");
                }
            }
            Err(e) => log::warn!("clipboard: cannot open system clipboard: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopClipboard;

    impl ClipboardProvider for NoopClipboard {
        fn write_text(&self, _text: &str) {}
    }

    /// If this test compiles, the trait is object-safe.
    #[test]
    fn box_dyn_clipboard_compiles() {
        let clipboard: Box<dyn ClipboardProvider> = Box::new(NoopClipboard);
        clipboard.write_text("hello");
    }
}
