//! Application state.
//!
//! ```text
//! AppState
//! ├── config: Config          (layout, clipboard and timing settings)
//! ├── source: String          (file name or "stdin", shown in the status line)
//! ├── tree: TreeViewState     (rows, selection, scroll, expansion)
//! │   └── menu: MenuSlot      (at most one open action menu)
//! ├── task_seq: TaskSeq       (clipboard task id generator)
//! ├── pending_copy            (the copy the open menu awaits)
//! └── terminal_size           (last size seen by the reducer)
//! ```
//!
//! Only the reducer mutates this; render functions take `&AppState`.

use jsonlens_core::NodeValue;
use jsonlens_core::config::Config;

use crate::common::{PendingCopy, TaskSeq};
use crate::features::tree::TreeViewState;

pub struct AppState {
    pub config: Config,
    pub source: String,
    pub tree: TreeViewState,
    pub task_seq: TaskSeq,
    pub pending_copy: PendingCopy,
    pub terminal_size: (u16, u16),
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: Config, root: NodeValue, source: impl Into<String>) -> Self {
        let tree = TreeViewState::from_config(root, &config);
        Self {
            config,
            source: source.into(),
            tree,
            task_seq: TaskSeq::default(),
            pending_copy: PendingCopy::default(),
            terminal_size: (0, 0),
            should_quit: false,
        }
    }
}
