//! Node action menu popup.
//!
//! Shows the three copy actions for one node. Keys and clicks inside the
//! popup run actions; a click anywhere outside closes it and is consumed, so
//! it never reaches the row underneath.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use jsonlens_core::{ActionMenu, MenuAction, MenuStatus};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{inner_area, place_beside, render_overlay_container};
use crate::common::{truncate_start_with_ellipsis, truncate_with_ellipsis};
use crate::effects::UiEffect;

const MENU_WIDTH: u16 = 34;
const BORDER_COLOR: Color = Color::Magenta;
const CHECK_GLYPH: &str = "✓";

fn menu_height(menu: &ActionMenu) -> u16 {
    let actions = MenuAction::all().len() as u16;
    let error_line = u16::from(menu.error().is_some());
    // actions, description, optional error, borders
    actions + 1 + error_line + 2
}

/// Screen area of the popup for `menu` inside `area`.
pub fn popup_area(menu: &ActionMenu, area: Rect) -> Rect {
    place_beside(
        menu.anchor.x,
        menu.anchor.y,
        MENU_WIDTH,
        menu_height(menu),
        area,
    )
}

fn run(menu: &mut ActionMenu, action: MenuAction) -> OverlayUpdate {
    let request = menu.begin(action);
    tracing::debug!(path = %menu.path(), action = %action, "running menu action");
    OverlayUpdate::emit(UiEffect::CopyToClipboard {
        task: None,
        menu: request.menu,
        action: request.action,
        text: request.text,
    })
}

pub fn handle_key(menu: &mut ActionMenu, key: KeyEvent) -> OverlayUpdate {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') => OverlayUpdate::close(),
        KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
        KeyCode::Up | KeyCode::Char('k') => {
            menu.select_prev();
            OverlayUpdate::stay()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            menu.select_next();
            OverlayUpdate::stay()
        }
        KeyCode::Enter => {
            let action = menu.selected_action();
            run(menu, action)
        }
        KeyCode::Char(c) => match MenuAction::from_hotkey(c) {
            Some(action) => run(menu, action),
            None => OverlayUpdate::stay(),
        },
        _ => OverlayUpdate::stay(),
    }
}

/// Action under screen row `y`, if `y` is one of the popup's action lines.
fn action_at(popup: Rect, y: u16) -> Option<usize> {
    let inner = inner_area(popup);
    let index = y.checked_sub(inner.y)? as usize;
    (index < MenuAction::all().len() && y < inner.bottom()).then_some(index)
}

/// Handles mouse input while the menu is open. `area` is the region the
/// popup is placed in.
pub fn handle_mouse(menu: &mut ActionMenu, area: Rect, mouse: MouseEvent) -> OverlayUpdate {
    let popup = popup_area(menu, area);
    let inside = popup.contains(Position::new(mouse.column, mouse.row));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !inside {
                return OverlayUpdate::close();
            }
            match action_at(popup, mouse.row) {
                Some(index) => {
                    menu.selected = index;
                    let action = menu.selected_action();
                    run(menu, action)
                }
                None => OverlayUpdate::stay(),
            }
        }
        MouseEventKind::Down(_) if !inside => OverlayUpdate::close(),
        MouseEventKind::Moved => {
            if inside && let Some(index) = action_at(popup, mouse.row) {
                menu.selected = index;
            }
            OverlayUpdate::stay()
        }
        _ => OverlayUpdate::stay(),
    }
}

pub fn render(frame: &mut Frame, menu: &ActionMenu, area: Rect) {
    let popup = popup_area(menu, area);
    let title = truncate_start_with_ellipsis(
        &menu.path().dotted(),
        popup.width.saturating_sub(4) as usize,
    );
    render_overlay_container(frame, popup, &title, BORDER_COLOR);

    let inner = inner_area(popup);
    let copying = match menu.status() {
        MenuStatus::Copying(action) => Some(*action),
        _ => None,
    };
    let confirmed = menu.confirmed_action();

    let mut lines: Vec<Line> = MenuAction::all()
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let selected = index == menu.selected;
            let marker = if selected { "▶ " } else { "  " };
            let status = if confirmed == Some(*action) {
                Span::styled(CHECK_GLYPH, Style::default().fg(Color::Green))
            } else if copying == Some(*action) {
                Span::styled("…", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(" ")
            };
            let label_width = (inner.width as usize).saturating_sub(2 + 2 + 2);
            let line = Line::from(vec![
                Span::raw(marker),
                Span::raw(format!("{:<label_width$}", action.label())),
                Span::styled(
                    format!("{} ", action.hotkey()),
                    Style::default().fg(Color::DarkGray),
                ),
                status,
            ]);
            if selected {
                line.style(
                    Style::default()
                        .bg(BORDER_COLOR)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                line
            }
        })
        .collect();

    lines.push(Line::from(Span::styled(
        truncate_with_ellipsis(menu.selected_action().description(), inner.width as usize),
        Style::default().fg(Color::DarkGray),
    )));

    if let Some(error) = menu.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use jsonlens_core::{Anchor, MenuSlot, NodePath, NodeValue};

    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn open(slot: &mut MenuSlot) -> &mut ActionMenu {
        slot.open(
            NodePath::from(["user", "name"]),
            NodeValue::string("Ann"),
            Anchor { x: 10, y: 3 },
        );
        slot.active_mut().unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn copied_text(update: &OverlayUpdate) -> Option<&str> {
        update.effects.iter().find_map(|effect| match effect {
            UiEffect::CopyToClipboard { text, .. } => Some(text.as_str()),
            UiEffect::Quit => None,
        })
    }

    #[test]
    fn test_hotkeys_emit_copy_effects() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        assert_eq!(copied_text(&handle_key(menu, key(KeyCode::Char('v')))), Some("\"Ann\""));
        assert_eq!(copied_text(&handle_key(menu, key(KeyCode::Char('r')))), Some("Ann"));
        assert_eq!(
            copied_text(&handle_key(menu, key(KeyCode::Char('p')))),
            Some("user.name")
        );
    }

    #[test]
    fn test_enter_runs_selected_action() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        handle_key(menu, key(KeyCode::Down));
        let update = handle_key(menu, key(KeyCode::Enter));
        assert_eq!(copied_text(&update), Some("Ann"));
        assert!(!update.is_close());
    }

    #[test]
    fn test_escape_closes() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        assert!(handle_key(menu, key(KeyCode::Esc)).is_close());
    }

    #[test]
    fn test_click_outside_closes() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        let update = handle_mouse(menu, AREA, mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        assert!(update.is_close());
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_click_on_action_line_runs_it() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        let popup = popup_area(menu, AREA);
        // third action line: border + 2
        let update = handle_mouse(
            menu,
            AREA,
            mouse(MouseEventKind::Down(MouseButton::Left), popup.x + 3, popup.y + 3),
        );
        assert_eq!(copied_text(&update), Some("user.name"));
        assert_eq!(menu.selected_action(), MenuAction::CopyPath);
    }

    #[test]
    fn test_click_on_border_stays_open() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        let popup = popup_area(menu, AREA);
        let update = handle_mouse(
            menu,
            AREA,
            mouse(MouseEventKind::Down(MouseButton::Left), popup.x, popup.y),
        );
        assert!(!update.is_close());
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_click_on_description_line_runs_nothing() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        let popup = popup_area(menu, AREA);
        let update = handle_mouse(
            menu,
            AREA,
            mouse(MouseEventKind::Down(MouseButton::Left), popup.x + 3, popup.y + 4),
        );
        assert!(!update.is_close());
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_popup_does_not_cover_anchor_row() {
        let mut slot = MenuSlot::default();
        let menu = open(&mut slot);
        let popup = popup_area(menu, AREA);
        assert!(popup.x > menu.anchor.x);
    }
}
