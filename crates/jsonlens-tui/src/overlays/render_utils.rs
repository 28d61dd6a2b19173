use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear};

/// Columns between an anchor cell and a popup placed to its right.
pub const ANCHOR_GAP: u16 = 2;

/// Places a `width` x `height` popup next to the anchor cell
/// `(anchor_x, anchor_y)` without covering the anchor's row.
///
/// Preference order: to the right of the anchor (top-aligned with the row),
/// below the row, above the row. Only when none of those fit inside `area`
/// does the popup overlap the row.
pub fn place_beside(anchor_x: u16, anchor_y: u16, width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let max_x = area.right().saturating_sub(width);
    let max_y = area.bottom().saturating_sub(height);

    let right_x = anchor_x.saturating_add(ANCHOR_GAP);
    if right_x <= max_x {
        let y = anchor_y.clamp(area.y, max_y.max(area.y));
        return Rect::new(right_x, y, width, height);
    }

    let x = anchor_x
        .saturating_sub(width.saturating_sub(1))
        .clamp(area.x, max_x.max(area.x));
    if anchor_y.saturating_add(1) <= max_y {
        return Rect::new(x, anchor_y + 1, width, height);
    }
    if anchor_y >= area.y.saturating_add(height) {
        return Rect::new(x, anchor_y - height, width, height);
    }

    Rect::new(max_x.max(area.x), area.y, width, height)
}

/// Clears the popup area and draws its border and title.
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Area inside a one-cell border.
pub fn inner_area(popup: Rect) -> Rect {
    Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    )
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Spans for a `key action • key action` hint line.
pub fn hint_spans(hints: &[InputHint<'_>], highlight_color: Color) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            hint.key.to_string(),
            Style::default().fg(highlight_color),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}
