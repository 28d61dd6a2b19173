//! UI event types.
//!
//! Everything that reaches the reducer is a `UiEvent`: terminal input, the
//! frame housekeeping tick, and results of async work sent back through the
//! runtime inbox.

use crossterm::event::Event;
use jsonlens_core::{MenuAction, MenuId};

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick; drives auto-dismiss and rendering cadence.
    Tick,

    /// Current terminal size, sent before other events every loop iteration.
    Frame { width: u16, height: u16 },

    /// Raw terminal input.
    Terminal(Event),

    /// A clipboard write finished.
    ClipboardCopied {
        task: TaskId,
        menu: MenuId,
        action: MenuAction,
        result: Result<(), String>,
    },
}
