//! Clipboard gateway: validation, clipboard writes, and acknowledgement
//! strings.
//!
//! Every tool funnels through here. The gateway decides whether input is
//! worth saving, writes the trimmed text to the clipboard, and builds the
//! acknowledgement the model sees. Empty input and clipboard failure are
//! outcomes, not errors: they come back as plain strings so the model can
//! relay them.

use std::sync::Arc;

use crate::clipboard::ClipboardWriter;

/// Marker prefixing successful acknowledgements.
pub const SUCCESS_MARKER: &str = "\u{2713}";

/// Marker prefixing failed acknowledgements.
pub const FAILURE_MARKER: &str = "\u{2717}";

/// Preview length for general content, in characters.
const CONTENT_PREVIEW_CHARS: usize = 50;

/// Preview length for code, in characters.
const CODE_PREVIEW_CHARS: usize = 100;

/// Validates input, writes the clipboard, and phrases the acknowledgement.
pub struct ClipboardGateway {
    writer: Arc<dyn ClipboardWriter>,
}

impl ClipboardGateway {
    pub fn new(writer: Arc<dyn ClipboardWriter>) -> Self {
        Self { writer }
    }

    /// Save arbitrary content. The clipboard receives the trimmed text; the
    /// acknowledgement previews the first characters of the original input.
    pub fn save_content(&self, content: &str) -> String {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return "Error: Cannot save empty content to clipboard".to_string();
        }

        if self.writer.write(trimmed) {
            format!(
                "{} Saved to clipboard: {}{}",
                SUCCESS_MARKER,
                truncate_chars(content, CONTENT_PREVIEW_CHARS),
                ellipsis_if_over(content, CONTENT_PREVIEW_CHARS),
            )
        } else {
            format!("{} Failed to save to clipboard.", FAILURE_MARKER)
        }
    }

    /// Save a shell command. The acknowledgement echoes the command in full,
    /// with the description in parentheses when one was given.
    pub fn save_command(&self, command: &str, description: &str) -> String {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return "Error: Cannot save empty command to clipboard".to_string();
        }

        if self.writer.write(trimmed) {
            let desc_text = if description.is_empty() {
                String::new()
            } else {
                format!(" ({})", description)
            };
            format!(
                "{} Command saved to clipboard{}: {}",
                SUCCESS_MARKER, desc_text, command,
            )
        } else {
            format!("{} Failed to save command to clipboard.", FAILURE_MARKER)
        }
    }

    /// Save a code snippet. The preview is built from the trimmed code with
    /// newlines flattened to spaces so it stays on one line.
    pub fn save_code(&self, code: &str, language: &str) -> String {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return "Error: Cannot save empty code to clipboard".to_string();
        }

        if self.writer.write(trimmed) {
            let lang_text = if language.is_empty() {
                String::new()
            } else {
                format!(" ({})", language)
            };
            let preview = truncate_chars(trimmed, CODE_PREVIEW_CHARS).replace('\n', " ");
            format!(
                "{} Code saved to clipboard{}: {}{}",
                SUCCESS_MARKER,
                lang_text,
                preview,
                ellipsis_if_over(trimmed, CODE_PREVIEW_CHARS),
            )
        } else {
            format!("{} Failed to save code to clipboard.", FAILURE_MARKER)
        }
    }
}

/// First `limit` characters of `text`. Character-based, never splits a
/// multi-byte scalar.
fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// `"..."` when `text` exceeds `limit` characters, empty otherwise.
fn ellipsis_if_over(text: &str, limit: usize) -> &'static str {
    if text.chars().count() > limit {
        "..."
    } else {
        ""
    }
}
