//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent};
use jsonlens_core::{MenuAction, MenuId};
use ratatui::layout::Rect;

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::tree::{self, TreeOutcome};
use crate::overlays::{OverlayUpdate, action_menu};
use crate::render;
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            handle_tick(app, Instant::now());
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::ClipboardCopied {
            task,
            menu,
            action,
            result,
        } => {
            handle_clipboard_copied(app, task, menu, action, result);
            vec![]
        }
    };
    assign_task_ids(app, effects)
}

/// Gives every task-spawning effect a fresh id and records it as the task
/// whose completion the reducer waits for.
fn assign_task_ids(app: &mut AppState, effects: Vec<UiEffect>) -> Vec<UiEffect> {
    effects
        .into_iter()
        .map(|effect| match effect {
            UiEffect::CopyToClipboard {
                task: None,
                menu,
                action,
                text,
            } => {
                let id = app.task_seq.next_id();
                app.pending_copy.start(id);
                UiEffect::CopyToClipboard {
                    task: Some(id),
                    menu,
                    action,
                    text,
                }
            }
            other => other,
        })
        .collect()
}

fn handle_tick(app: &mut AppState, now: Instant) {
    if app.tree.menu.tick(now) {
        tracing::debug!("action menu dismissed after copy");
        app.pending_copy.forget();
    }
}

// ============================================================================
// Frame Handler
// ============================================================================

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    app.terminal_size = (width, height);
    let (pane, _) = render::split_tree_area(render::tree_area(Rect::new(0, 0, width, height)));
    let moved = app.tree.set_pane(pane);
    // the menu anchor is a screen cell; it is meaningless after a resize
    if moved && app.tree.menu.is_open() {
        dismiss_menu(app);
    }
}

fn menu_region(app: &AppState) -> Rect {
    let (width, height) = app.terminal_size;
    render::tree_area(Rect::new(0, 0, width, height))
}

// ============================================================================
// Clipboard completion
// ============================================================================

fn handle_clipboard_copied(
    app: &mut AppState,
    task: TaskId,
    menu: MenuId,
    action: MenuAction,
    result: Result<(), String>,
) {
    let current = app.pending_copy.settle(task);

    if let Err(error) = &result {
        tracing::warn!(action = %action, error = %error, "clipboard write failed");
    }
    if !current {
        tracing::debug!(task = task.0, "dropping stale clipboard completion");
        return;
    }
    let Some(open) = app.tree.menu.get_mut(menu) else {
        return;
    };
    match result {
        Ok(()) => open.copy_succeeded(action, Instant::now(), app.config.dismiss_after()),
        Err(error) => open.copy_failed(action, error),
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(menu) = app.tree.menu.active_mut() {
        let update = action_menu::handle_key(menu, key);
        return apply_overlay_update(app, update);
    }
    let outcome = tree::handle_key(&mut app.tree, key);
    tree_outcome(app, outcome)
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let region = menu_region(app);
    if let Some(menu) = app.tree.menu.active_mut() {
        // the menu is modal: nothing reaches the tree while it is open
        let update = action_menu::handle_mouse(menu, region, mouse);
        return apply_overlay_update(app, update);
    }
    let outcome = tree::handle_mouse(&mut app.tree, mouse);
    tree_outcome(app, outcome)
}

fn tree_outcome(app: &mut AppState, outcome: TreeOutcome) -> Vec<UiEffect> {
    match outcome {
        TreeOutcome::Quit => vec![UiEffect::Quit],
        TreeOutcome::MenuOpened => {
            // completions for a previous menu must not land on this one
            app.pending_copy.forget();
            vec![]
        }
        TreeOutcome::Handled | TreeOutcome::Ignored => vec![],
    }
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    if update.is_close() {
        dismiss_menu(app);
    }
    update.effects
}

fn dismiss_menu(app: &mut AppState) {
    if let Some(menu) = app.tree.menu.dismiss() {
        tracing::debug!(path = %menu.path(), "action menu closed");
    }
    app.pending_copy.forget();
}
