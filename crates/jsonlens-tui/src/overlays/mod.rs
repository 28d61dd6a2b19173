//! Popups drawn over the tree.
//!
//! An open overlay receives all keyboard and mouse input. Its handlers answer
//! with an `OverlayUpdate`; the reducer closes the overlay when asked and
//! passes the effects on to the runtime.
//!
//! - `action_menu.rs`: per-node copy menu
//! - `render_utils.rs`: popup placement, borders, key hints

pub mod action_menu;
pub mod render_utils;

use crate::effects::UiEffect;

/// Result of routing one input event to an overlay.
#[derive(Debug, Default)]
pub struct OverlayUpdate {
    pub dismiss: bool,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    /// Input consumed, overlay stays open.
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn close() -> Self {
        Self {
            dismiss: true,
            effects: Vec::new(),
        }
    }

    /// Overlay stays open and asks the runtime to perform `effect`.
    pub fn emit(effect: UiEffect) -> Self {
        Self {
            dismiss: false,
            effects: vec![effect],
        }
    }

    pub fn is_close(&self) -> bool {
        self.dismiss
    }
}
