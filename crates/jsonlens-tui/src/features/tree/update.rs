//! Tree key and mouse handling (when no menu is open).
//!
//! Mouse clicks follow one ordering rule: a press on a row's trigger opens
//! the action menu and is never also treated as a toggle. Every other press
//! on a row selects it and toggles it if it is a non-empty container.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::state::{MOUSE_SCROLL_ROWS, TreeViewState};

/// What a tree input did, for the reducer to follow up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOutcome {
    Ignored,
    Handled,
    MenuOpened,
    Quit,
}

pub fn handle_key(tree: &mut TreeViewState, key: KeyEvent) -> TreeOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => TreeOutcome::Quit,
        KeyCode::Char('q') => TreeOutcome::Quit,
        KeyCode::Up | KeyCode::Char('k') => {
            tree.move_selection(-1);
            TreeOutcome::Handled
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tree.move_selection(1);
            TreeOutcome::Handled
        }
        KeyCode::PageUp => {
            let page = isize::try_from(tree.page_size()).unwrap_or(isize::MAX);
            tree.move_selection(-page);
            TreeOutcome::Handled
        }
        KeyCode::PageDown => {
            let page = isize::try_from(tree.page_size()).unwrap_or(isize::MAX);
            tree.move_selection(page);
            TreeOutcome::Handled
        }
        KeyCode::Home | KeyCode::Char('g') => {
            tree.select_first();
            TreeOutcome::Handled
        }
        KeyCode::End | KeyCode::Char('G') => {
            tree.select_last();
            TreeOutcome::Handled
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            tree.toggle(tree.selected);
            TreeOutcome::Handled
        }
        KeyCode::Right | KeyCode::Char('l') => {
            expand_or_descend(tree);
            TreeOutcome::Handled
        }
        KeyCode::Left | KeyCode::Char('h') => {
            collapse_or_ascend(tree);
            TreeOutcome::Handled
        }
        KeyCode::Char('m') => {
            if tree.open_menu(tree.selected).is_some() {
                TreeOutcome::MenuOpened
            } else {
                TreeOutcome::Handled
            }
        }
        _ => TreeOutcome::Ignored,
    }
}

fn expand_or_descend(tree: &mut TreeViewState) {
    let index = tree.selected;
    if tree.set_expanded(index, true) {
        return;
    }
    if tree.is_expanded(index) {
        tree.move_selection(1);
    }
}

fn collapse_or_ascend(tree: &mut TreeViewState) {
    let index = tree.selected;
    let on_closing = tree.selected_row().is_some_and(|row| row.is_closing());
    if !on_closing && tree.set_expanded(index, false) {
        return;
    }
    let parent = tree.selected_row().and_then(|row| {
        if row.is_closing() {
            Some(row.id.clone())
        } else {
            row.id.parent()
        }
    });
    if let Some(index) = parent.and_then(|id| tree.index_of(&id)) {
        tree.select(index);
    }
}

pub fn handle_mouse(tree: &mut TreeViewState, mouse: MouseEvent) -> TreeOutcome {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            tree.scroll_by(-MOUSE_SCROLL_ROWS);
            tree.hovered = tree.row_at(mouse.column, mouse.row);
            TreeOutcome::Handled
        }
        MouseEventKind::ScrollDown => {
            tree.scroll_by(MOUSE_SCROLL_ROWS);
            tree.hovered = tree.row_at(mouse.column, mouse.row);
            TreeOutcome::Handled
        }
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            tree.hovered = tree.row_at(mouse.column, mouse.row);
            TreeOutcome::Handled
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(index) = tree.row_at(mouse.column, mouse.row) else {
                return TreeOutcome::Ignored;
            };
            // trigger first: opening the menu must not toggle the row
            if tree.is_trigger_hit(index, mouse.column) {
                return if tree.open_menu(index).is_some() {
                    TreeOutcome::MenuOpened
                } else {
                    TreeOutcome::Handled
                };
            }
            tree.select(index);
            tree.toggle(index);
            tree.hovered = tree.row_at(mouse.column, mouse.row);
            TreeOutcome::Handled
        }
        _ => TreeOutcome::Ignored,
    }
}
