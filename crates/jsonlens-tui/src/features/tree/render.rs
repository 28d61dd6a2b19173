//! Tree pane rendering.
//!
//! Pure functions: read `TreeViewState`, draw into the frame.

use jsonlens_core::{NodeKind, Row, RowBody};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{TREE_MARGIN, TreeViewState};
use crate::common::{Scrollbar, sanitize_for_display};

/// Glyph of the per-row action menu trigger.
pub const TRIGGER_GLYPH: &str = "⧉";

const SELECTED_BG: Color = Color::Indexed(236);

/// Value style per kind. Keys always use `key_style`.
pub fn kind_style(kind: NodeKind) -> Style {
    match kind {
        NodeKind::String => Style::default().fg(Color::Red),
        NodeKind::Number => Style::default().fg(Color::Green),
        NodeKind::Boolean | NodeKind::Null | NodeKind::Undefined => {
            Style::default().fg(Color::Blue)
        }
        NodeKind::Array | NodeKind::Object => Style::default(),
    }
}

pub fn key_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Styled spans of one row. Their text concatenates to `display_text(row)`.
pub fn row_spans(row: &Row) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(6);
    spans.push(Span::raw(" ".repeat(row.indent)));
    if row.is_closing() {
        spans.push(Span::raw("  "));
    } else {
        spans.push(Span::styled(format!("{} ", row.disclosure().glyph()), muted()));
    }
    if let Some(name) = row.name() {
        spans.push(Span::styled(sanitize_for_display(name).into_owned(), key_style()));
        spans.push(Span::raw(": "));
    }
    match &row.body {
        RowBody::Leaf { text } => {
            spans.push(Span::styled(
                sanitize_for_display(text).into_owned(),
                kind_style(row.kind),
            ));
        }
        RowBody::Container { open, tail, .. } => {
            spans.push(Span::raw(open.to_string()));
            if let Some(tail) = tail {
                if let Some(preview) = &tail.preview {
                    spans.push(Span::styled(
                        format!(" {preview} "),
                        muted().add_modifier(Modifier::ITALIC),
                    ));
                }
                spans.push(Span::raw(tail.close.to_string()));
            }
        }
        RowBody::Close { bracket } => spans.push(Span::raw(bracket.to_string())),
    }
    spans
}

/// Draws visible rows into `pane` and the scrollbar into `scrollbar_area`.
pub fn render_tree(frame: &mut Frame, tree: &TreeViewState, pane: Rect, scrollbar_area: Rect) {
    let rows = tree.rows();
    let height = pane.height as usize;
    let start = tree.scroll_offset.min(rows.len());
    let end = (start + height).min(rows.len());

    for (index, row) in rows.iter().enumerate().take(end).skip(start) {
        let Some(y) = tree.row_y(index) else {
            continue;
        };
        let selected = index == tree.selected;
        let mut line = Line::from(row_spans(row));
        if selected {
            line = line.style(Style::default().bg(SELECTED_BG));
        }
        let line_area = Rect::new(
            pane.x + TREE_MARGIN,
            y,
            pane.width.saturating_sub(TREE_MARGIN),
            1,
        );
        if selected {
            frame.render_widget(
                Paragraph::new("").style(Style::default().bg(SELECTED_BG)),
                Rect::new(pane.x, y, pane.width, 1),
            );
        }
        frame.render_widget(Paragraph::new(line), line_area);

        let menu_row = tree.is_menu_row(index);
        let show_trigger = menu_row || selected || tree.hovered == Some(index);
        if show_trigger && let Some(x) = tree.trigger_x(index) {
            let color = if menu_row {
                Color::Magenta
            } else if tree.hovered == Some(index) {
                Color::Yellow
            } else {
                Color::DarkGray
            };
            let mut style = Style::default().fg(color);
            if selected {
                style = style.bg(SELECTED_BG);
            }
            frame.buffer_mut().set_string(x, y, TRIGGER_GLYPH, style);
        }
    }

    frame.render_widget(
        Scrollbar::new(rows.len(), height, tree.scroll_offset),
        scrollbar_area,
    );
}
