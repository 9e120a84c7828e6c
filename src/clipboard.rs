//! Clipboard access seam.
//!
//! [`ClipboardWriter`] is the one point where the crate touches the OS.
//! Everything above it (gateway, tools, protocol) takes the trait object, so
//! tests swap in fakes and never depend on a display server being present.

use tracing::warn;

/// Writes text to a clipboard. Returns `true` on success.
///
/// Failures are reported as `false`, never as panics: the caller turns a
/// failed write into a user-visible message, not a crash.
pub trait ClipboardWriter: Send + Sync {
    fn write(&self, text: &str) -> bool;
}

/// The OS clipboard, via `arboard`.
///
/// A fresh clipboard handle is opened per write. Holding one open for the
/// process lifetime pins clipboard ownership on X11 and keeps a platform
/// handle alive for no benefit at this call rate.
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write(&self, text: &str) -> bool {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(text) {
                Ok(()) => true,
                Err(e) => {
                    warn!("clipboard write failed: {}", e);
                    false
                }
            },
            Err(e) => {
                warn!("clipboard unavailable: {}", e);
                false
            }
        }
    }
}
