//! Tree view state.
//!
//! Owns the document, its expansion state, the cached rows, selection and
//! scrolling, plus the single action-menu slot. Screen geometry (`pane`) is
//! recorded on every frame so mouse hit-testing and rendering agree on where
//! each row and trigger sits.

use jsonlens_core::config::Config;
use jsonlens_core::{
    Anchor, ExpansionState, LayoutOptions, MenuId, MenuSlot, NodeId, NodeValue, Row, find_node, layout,
};
use ratatui::layout::Rect;

use crate::common::{display_width, sanitize_for_display};

/// Columns left blank before the row text.
pub const TREE_MARGIN: u16 = 1;

/// Rows scrolled per mouse wheel notch.
pub const MOUSE_SCROLL_ROWS: isize = 3;

/// Row text as drawn on screen, without styles.
pub fn display_text(row: &Row) -> String {
    sanitize_for_display(&row.plain_text()).into_owned()
}

pub struct TreeViewState {
    root: NodeValue,
    expansion: ExpansionState,
    options: LayoutOptions,
    rows: Vec<Row>,
    /// Index of the selected row.
    pub selected: usize,
    /// Index of the first visible row.
    pub scroll_offset: usize,
    /// Row under the mouse pointer.
    pub hovered: Option<usize>,
    pane: Rect,
    pub menu: MenuSlot,
    /// Node the menu `MenuId` was opened on.
    menu_node: Option<(MenuId, NodeId)>,
}

impl TreeViewState {
    pub fn new(root: NodeValue, expansion: ExpansionState, options: LayoutOptions) -> Self {
        let rows = layout(&root, &expansion, &options);
        Self {
            root,
            expansion,
            options,
            rows,
            selected: 0,
            scroll_offset: 0,
            hovered: None,
            pane: Rect::default(),
            menu: MenuSlot::default(),
            menu_node: None,
        }
    }

    pub fn from_config(root: NodeValue, config: &Config) -> Self {
        Self::new(
            root,
            ExpansionState::new(config.expand_depth),
            config.layout_options(),
        )
    }

    pub fn root(&self) -> &NodeValue {
        &self.root
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected)
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    pub fn pane(&self) -> Rect {
        self.pane
    }

    /// Records where the tree is drawn. Returns true if the pane moved or
    /// changed size.
    pub fn set_pane(&mut self, pane: Rect) -> bool {
        let changed = self.pane != pane;
        self.pane = pane;
        self.clamp_scroll();
        changed
    }

    pub fn viewport_height(&self) -> usize {
        self.pane.height as usize
    }

    pub fn max_scroll(&self) -> usize {
        self.rows.len().saturating_sub(self.viewport_height())
    }

    /// Screen row of row `index`, if it is on screen.
    pub fn row_y(&self, index: usize) -> Option<u16> {
        let rel = index.checked_sub(self.scroll_offset)?;
        if rel >= self.viewport_height() || index >= self.rows.len() {
            return None;
        }
        u16::try_from(rel).ok().map(|rel| self.pane.y + rel)
    }

    /// Row index under screen cell `(column, y)`.
    pub fn row_at(&self, column: u16, y: u16) -> Option<usize> {
        let inside = column >= self.pane.x
            && column < self.pane.right()
            && y >= self.pane.y
            && y < self.pane.bottom();
        if !inside {
            return None;
        }
        let index = self.scroll_offset + (y - self.pane.y) as usize;
        (index < self.rows.len()).then_some(index)
    }

    /// Column of the menu trigger of row `index`.
    ///
    /// The trigger sits one cell after the row text, or in the last column
    /// when the text is wider than the pane. Closing rows have none.
    pub fn trigger_x(&self, index: usize) -> Option<u16> {
        let row = self.rows.get(index).filter(|row| row.is_node())?;
        let content_x = self.pane.x + TREE_MARGIN;
        let content_width = self.pane.width.checked_sub(TREE_MARGIN)?;
        if content_width == 0 {
            return None;
        }
        let text_width = display_width(&display_text(row));
        let offset = (text_width + 1).min(content_width as usize - 1);
        u16::try_from(offset).ok().map(|offset| content_x + offset)
    }

    pub fn is_trigger_hit(&self, index: usize, column: u16) -> bool {
        self.trigger_x(index) == Some(column)
    }

    // ========================================================================
    // Selection and scrolling
    // ========================================================================

    pub fn select(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = index.min(self.rows.len() - 1);
        self.ensure_visible();
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.select(self.selected.saturating_add_signed(delta));
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(self.rows.len().saturating_sub(1));
    }

    pub fn page_size(&self) -> usize {
        self.viewport_height().saturating_sub(1).max(1)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Scrolls just enough to bring the selected row on screen.
    pub fn ensure_visible(&mut self) {
        let height = self.viewport_height();
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
        self.clamp_scroll();
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    /// True when row `index` is an open container.
    pub fn is_expanded(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .filter(|row| row.is_toggleable())
            .is_some_and(|row| self.expansion.is_expanded(&row.id))
    }

    /// Toggles row `index` if it has a disclosure control.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(row) = self.rows.get(index).filter(|row| row.is_toggleable()) else {
            return false;
        };
        let id = row.id.clone();
        let expanded = self.expansion.toggle(&id);
        tracing::trace!(path = %row.path, expanded, "toggled node");
        self.relayout();
        true
    }

    /// Expands or collapses row `index`. Returns true if the state changed.
    pub fn set_expanded(&mut self, index: usize, expanded: bool) -> bool {
        let Some(row) = self.rows.get(index).filter(|row| row.is_toggleable()) else {
            return false;
        };
        if self.expansion.is_expanded(&row.id) == expanded {
            return false;
        }
        let id = row.id.clone();
        self.expansion.set(&id, expanded);
        self.relayout();
        true
    }

    /// Rebuilds rows, keeping the selection on the same row or its nearest
    /// visible ancestor.
    pub fn relayout(&mut self) {
        let anchor = self
            .selected_row()
            .map(|row| (row.id.clone(), row.is_closing()));
        self.rows = layout(&self.root, &self.expansion, &self.options);
        self.hovered = None;

        if let Some((id, closing)) = anchor {
            self.selected = locate(&self.rows, &id, closing).unwrap_or(0);
        }
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.clamp_scroll();
        self.ensure_visible();
    }

    /// Index of the node row for `id` (not its closing row).
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        find_node(&self.rows, id)
    }

    // ========================================================================
    // Action menu
    // ========================================================================

    /// Opens the action menu for row `index`, replacing any open menu.
    pub fn open_menu(&mut self, index: usize) -> Option<MenuId> {
        let row = self.rows.get(index).filter(|row| row.is_node())?;
        let path = row.path.clone();
        let row_id = row.id.clone();
        let value = self.root.node(&row_id)?.clone();
        self.selected = index;
        self.ensure_visible();
        let anchor = Anchor {
            x: self.trigger_x(index)?,
            y: self.row_y(index)?,
        };
        tracing::debug!(path = %path, "opening action menu");
        let menu_id = self.menu.open(path, value, anchor);
        self.menu_node = Some((menu_id, row_id));
        Some(menu_id)
    }

    /// True when row `index` owns the visible action menu.
    pub fn is_menu_row(&self, index: usize) -> bool {
        let (Some(menu), Some((menu_id, node)), Some(row)) =
            (self.menu.active(), &self.menu_node, self.rows.get(index))
        else {
            return false;
        };
        menu.id() == *menu_id && row.is_node() && row.id == *node
    }
}

fn locate(rows: &[Row], id: &NodeId, closing: bool) -> Option<usize> {
    if let Some(index) = rows
        .iter()
        .position(|row| &row.id == id && row.is_closing() == closing)
    {
        return Some(index);
    }
    let mut current = id.clone();
    loop {
        if let Some(index) = find_node(rows, &current) {
            return Some(index);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
impl TreeViewState {
    /// First node row shown under `path`.
    pub(crate) fn index_of_path(&self, path: &jsonlens_core::NodePath) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.is_node() && row.path == *path)
    }
}
