//! Shared utilities used across tree and overlay code.

pub mod clipboard;
pub mod scrollbar;
pub mod task;
pub mod text;

pub use clipboard::{Clipboard, ClipboardError};
pub use scrollbar::Scrollbar;
pub use task::{PendingCopy, TaskId, TaskSeq};
pub use text::{display_width, sanitize_for_display, truncate_start_with_ellipsis, truncate_with_ellipsis};
