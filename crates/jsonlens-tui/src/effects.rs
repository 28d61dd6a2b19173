//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never touches the clipboard or the terminal directly.

use jsonlens_core::{MenuAction, MenuId};

use crate::common::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Write `text` to the clipboard and report back as
    /// `UiEvent::ClipboardCopied`.
    ///
    /// `task` is filled in by the reducer before the effect leaves it.
    CopyToClipboard {
        task: Option<TaskId>,
        menu: MenuId,
        action: MenuAction,
        text: String,
    },
}
