//! Tree scrollbar with a stable thumb size.
//!
//! The thumb length depends only on the content and viewport sizes, never on
//! the scroll position, and the thumb touches the bottom exactly at the
//! maximum offset.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

#[derive(Debug, Clone, Copy)]
pub struct Scrollbar {
    total_rows: usize,
    viewport_height: usize,
    scroll_offset: usize,
}

impl Scrollbar {
    pub fn new(total_rows: usize, viewport_height: usize, scroll_offset: usize) -> Self {
        Self {
            total_rows,
            viewport_height,
            scroll_offset,
        }
    }

    fn should_display(&self) -> bool {
        self.total_rows > self.viewport_height
    }

    /// Thumb `(start, len)` on a track of `track_len` cells, `None` when the
    /// content fits.
    pub fn thumb(&self, track_len: usize) -> Option<(usize, usize)> {
        let max_scroll = self.total_rows.saturating_sub(self.viewport_height);
        if !self.should_display() || track_len == 0 || max_scroll == 0 {
            return None;
        }
        let viewport_len = self.viewport_height.min(track_len);

        // round(track * viewport / (total - 1 + viewport))
        let denom = (self.total_rows - 1 + viewport_len) as u64;
        let numerator = track_len as u64 * viewport_len as u64;
        let len = usize::try_from((numerator + denom / 2) / denom)
            .unwrap_or(track_len)
            .clamp(1, track_len);

        let available = (track_len - len) as u64;
        let offset = self.scroll_offset.min(max_scroll) as u64;
        let start = usize::try_from(offset * available / max_scroll as u64).unwrap_or(0);
        Some((start, len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((start, len)) = self.thumb(area.height as usize) else {
            return;
        };

        let x = area.x + area.width.saturating_sub(1);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let (symbol, color) = if idx >= start && idx < start + len {
                (THUMB_SYMBOL, Color::Gray)
            } else {
                (TRACK_SYMBOL, Color::DarkGray)
            };
            buf.set_string(x, y, symbol, Style::default().fg(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_rows_fit() {
        assert_eq!(Scrollbar::new(10, 20, 0).thumb(20), None);
        assert_eq!(Scrollbar::new(20, 20, 0).thumb(20), None);
    }

    #[test]
    fn test_thumb_size_is_stable_across_offsets() {
        let lens: Vec<_> = (0..=80)
            .filter_map(|offset| Scrollbar::new(100, 20, offset).thumb(20))
            .map(|(_, len)| len)
            .collect();
        assert_eq!(lens.len(), 81);
        assert!(lens.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_thumb_reaches_bottom_at_max_offset() {
        let (start, len) = Scrollbar::new(100, 20, 80).thumb(20).unwrap();
        assert_eq!(start + len, 20);
        let (start, _) = Scrollbar::new(100, 20, 0).thumb(20).unwrap();
        assert_eq!(start, 0);
    }
}
