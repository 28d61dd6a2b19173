//! Tree feature: the scrollable, collapsible view of the document.

pub mod render;
pub mod state;
pub mod update;

pub use render::{TRIGGER_GLYPH, kind_style, render_tree};
pub use state::TreeViewState;
pub use update::{TreeOutcome, handle_key, handle_mouse};
