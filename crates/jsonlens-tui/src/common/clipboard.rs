//! Clipboard transports.
//!
//! Two ways to reach the clipboard:
//! 1. OSC 52 - terminal escape sequence written to stdout (works over SSH)
//! 2. System clipboard via `arboard`
//!
//! `ClipboardMode` picks one or both. OSC 52 shares stdout with the renderer,
//! so the runtime calls it on the event loop thread; the system clipboard can
//! block (X11 selection owners) and runs on the blocking pool.

use std::fmt;
use std::io::Write;

/// Clipboard access with per-transport entry points.
pub struct Clipboard;

impl Clipboard {
    /// Writes the OSC 52 escape sequence for `text` to stdout.
    pub fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;
        stdout
            .flush()
            .map_err(|e| ClipboardError::Osc52(e.to_string()))
    }

    /// Copies text with the system clipboard.
    pub fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))
    }
}

/// `ESC ] 52 ; c ; <base64> ESC \` targeting the system selection.
pub fn osc52_sequence(text: &str) -> String {
    use base64::Engine;

    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Clipboard operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// OSC 52 write failed.
    Osc52(String),
    /// System clipboard operation failed.
    System(String),
    /// The background copy task did not finish.
    Aborted(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Osc52(msg) => write!(f, "OSC 52 clipboard failed: {msg}"),
            ClipboardError::System(msg) => write!(f, "System clipboard failed: {msg}"),
            ClipboardError::Aborted(msg) => write!(f, "Clipboard task aborted: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_payload() {
        assert_eq!(osc52_sequence("Ann"), "\x1b]52;c;QW5u\x1b\\");
    }

    #[test]
    fn test_osc52_sequence_handles_utf8() {
        let seq = osc52_sequence("ü");
        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with("\x1b\\"));
        assert!(seq.contains("w7w="));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClipboardError::System("no display".to_string()).to_string(),
            "System clipboard failed: no display"
        );
        assert_eq!(
            ClipboardError::Osc52("broken pipe".to_string()).to_string(),
            "OSC 52 clipboard failed: broken pipe"
        );
    }
}
