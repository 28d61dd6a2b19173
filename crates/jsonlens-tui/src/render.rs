//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects. The layout helpers are shared with the
//! reducer so hit-testing uses the same geometry as drawing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{display_width, truncate_start_with_ellipsis, truncate_with_ellipsis};
use crate::features::tree::render_tree;
use crate::overlays::action_menu;
use crate::overlays::render_utils::{InputHint, hint_spans};
use crate::state::AppState;

/// Height of the status line below the tree.
const STATUS_HEIGHT: u16 = 1;

/// Width reserved for the scrollbar on the right side.
const SCROLLBAR_WIDTH: u16 = 1;

/// Region holding the tree and its scrollbar (everything above the status
/// line). Popups are placed inside it.
pub fn tree_area(area: Rect) -> Rect {
    Rect::new(
        area.x,
        area.y,
        area.width,
        area.height.saturating_sub(STATUS_HEIGHT),
    )
}

/// Splits the tree region into the row pane and the scrollbar column.
pub fn split_tree_area(tree_area: Rect) -> (Rect, Rect) {
    let pane_width = tree_area.width.saturating_sub(SCROLLBAR_WIDTH);
    let pane = Rect::new(tree_area.x, tree_area.y, pane_width, tree_area.height);
    let scrollbar = Rect::new(
        tree_area.x + pane_width,
        tree_area.y,
        tree_area.width - pane_width,
        tree_area.height,
    );
    (pane, scrollbar)
}

fn status_area(area: Rect) -> Rect {
    let height = STATUS_HEIGHT.min(area.height);
    Rect::new(area.x, area.bottom() - height, area.width, height)
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let tree_region = tree_area(area);
    let (pane, scrollbar) = split_tree_area(tree_region);

    render_tree(frame, &app.tree, pane, scrollbar);
    render_status_line(frame, app, status_area(area));

    if let Some(menu) = app.tree.menu.active() {
        action_menu::render(frame, menu, tree_region);
    }
}

fn render_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    if area.height == 0 {
        return;
    }

    let hints: &[InputHint] = if app.tree.menu.is_open() {
        &[
            InputHint::new("↑↓", "select"),
            InputHint::new("↵", "copy"),
            InputHint::new("v/r/p", "shortcut"),
            InputHint::new("Esc", "close"),
        ]
    } else {
        &[
            InputHint::new("↵", "toggle"),
            InputHint::new("m", "actions"),
            InputHint::new("q", "quit"),
        ]
    };
    let right = hint_spans(hints, Color::Cyan);
    let right_width: usize = right.iter().map(|span| display_width(&span.content)).sum();

    let path = app
        .tree
        .selected_row()
        .map(|row| row.path.dotted())
        .unwrap_or_default();
    let left_budget = (area.width as usize).saturating_sub(right_width + 2);
    // long file names give way to the path
    let source = truncate_with_ellipsis(&app.source, (left_budget / 2).max(1));
    let source = format!(" {source} ");
    let path_budget = left_budget.saturating_sub(display_width(&source) + 2);
    let path = truncate_start_with_ellipsis(&path, path_budget);

    let mut spans = vec![
        Span::styled(source, Style::default().fg(Color::DarkGray)),
        Span::styled("› ", Style::default().fg(Color::DarkGray)),
        Span::styled(path, Style::default().fg(Color::Cyan)),
    ];
    let left_width: usize = spans.iter().map(|span| display_width(&span.content)).sum();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(right);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use jsonlens_core::NodeValue;
    use jsonlens_core::config::Config;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    use super::*;
    use crate::events::UiEvent;
    use crate::update::update;

    fn buffer_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn app() -> AppState {
        let value = NodeValue::from(json!({"user": {"name": "Ann", "tags": ["x", "y"]}}));
        let mut app = AppState::new(Config::default(), value, "sample.json");
        update(
            &mut app,
            UiEvent::Frame {
                width: 60,
                height: 10,
            },
        );
        app
    }

    #[test]
    fn test_renders_default_tree() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let lines = buffer_lines(&terminal);

        assert!(lines[0].starts_with(" ▾ {"));
        assert!(lines[1].starts_with("   ▾ user: {"));
        assert!(lines[2].starts_with("       name: \"Ann\""));
        assert!(lines[3].starts_with("     ▸ tags: [ Array(2) ]"));
        assert!(lines[9].contains("sample.json"));
    }

    #[test]
    fn test_selected_row_shows_trigger() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let lines = buffer_lines(&terminal);
        assert!(lines[0].contains(crate::features::tree::TRIGGER_GLYPH));
        assert!(!lines[2].contains(crate::features::tree::TRIGGER_GLYPH));
    }

    #[test]
    fn test_open_menu_is_drawn() {
        let mut app = app();
        app.tree.open_menu(2);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let screen = buffer_lines(&terminal).join("\n");
        assert!(screen.contains("Copy Value"));
        assert!(screen.contains("Copy Raw Value"));
        assert!(screen.contains("Copy Path"));
        assert!(screen.contains("user.name"));
    }

    #[test]
    fn test_split_tree_area_reserves_scrollbar() {
        let (pane, scrollbar) = split_tree_area(Rect::new(0, 0, 40, 9));
        assert_eq!(pane.width, 39);
        assert_eq!(scrollbar.x, 39);
        assert_eq!(scrollbar.width, 1);
    }
}
