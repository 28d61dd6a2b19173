//! Node action menu state.
//!
//! At most one menu is open per tree view. The view owns a [`MenuSlot`];
//! opening a menu replaces whatever was open before ("last open wins").
//! Each opened menu gets a fresh [`MenuId`], and async copy completions are
//! tagged with it, so a completion for a menu that was dismissed or replaced
//! is recognised as stale and ignored.
//!
//! ## Lifecycle
//!
//! ```text
//! open ──► Idle ──action──► Copying ──ok──► Copied ──(delay)──► dismissed
//!                              │
//!                              └──err──► Failed ──action──► Copying ...
//! outside click / Esc: dismissed from any state
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use crate::model;
use crate::path::NodePath;
use crate::value::NodeValue;

/// Default delay between a successful copy and the menu closing itself.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(1000);

/// The three export actions a menu offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    CopyValue,
    CopyRaw,
    CopyPath,
}

impl MenuAction {
    /// All actions in menu order.
    pub fn all() -> &'static [MenuAction] {
        &[
            MenuAction::CopyValue,
            MenuAction::CopyRaw,
            MenuAction::CopyPath,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::CopyValue => "Copy Value",
            MenuAction::CopyRaw => "Copy Raw Value",
            MenuAction::CopyPath => "Copy Path",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuAction::CopyValue => "Copy the formatted value",
            MenuAction::CopyRaw => "Copy the raw value without formatting",
            MenuAction::CopyPath => "Copy the JSON path to this property",
        }
    }

    /// Single-key shortcut inside the menu.
    pub fn hotkey(self) -> char {
        match self {
            MenuAction::CopyValue => 'v',
            MenuAction::CopyRaw => 'r',
            MenuAction::CopyPath => 'p',
        }
    }

    pub fn from_hotkey(c: char) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.hotkey() == c.to_ascii_lowercase())
    }

    /// Text this action writes to the clipboard.
    pub fn payload(self, value: &NodeValue, path: &NodePath) -> String {
        match self {
            MenuAction::CopyValue => model::format(value),
            MenuAction::CopyRaw => model::raw(value),
            MenuAction::CopyPath => path.dotted(),
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of one opened menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub u64);

/// Screen cell of the trigger that opened the menu. The popup is placed
/// beside it, never over the anchored row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchor {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuStatus {
    Idle,
    Copying(MenuAction),
    Copied {
        action: MenuAction,
        dismiss_at: Instant,
    },
    Failed {
        action: MenuAction,
        error: String,
    },
}

/// A clipboard write requested by a menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub menu: MenuId,
    pub action: MenuAction,
    pub text: String,
}

/// An open menu bound to one node.
#[derive(Debug, Clone)]
pub struct ActionMenu {
    id: MenuId,
    path: NodePath,
    value: NodeValue,
    pub anchor: Anchor,
    /// Highlighted action index.
    pub selected: usize,
    status: MenuStatus,
}

impl ActionMenu {
    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn status(&self) -> &MenuStatus {
        &self.status
    }

    pub fn selected_action(&self) -> MenuAction {
        MenuAction::all()
            .get(self.selected)
            .copied()
            .unwrap_or(MenuAction::CopyValue)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < MenuAction::all().len() {
            self.selected += 1;
        }
    }

    /// Starts `action` and returns the clipboard request to run.
    ///
    /// Actions stay available in every state, so a failed copy can be
    /// retried and a confirmed one repeated.
    pub fn begin(&mut self, action: MenuAction) -> CopyRequest {
        if let Some(index) = MenuAction::all().iter().position(|a| *a == action) {
            self.selected = index;
        }
        self.status = MenuStatus::Copying(action);
        CopyRequest {
            menu: self.id,
            action,
            text: action.payload(&self.value, &self.path),
        }
    }

    /// Records a successful copy and schedules auto-dismiss.
    pub fn copy_succeeded(&mut self, action: MenuAction, now: Instant, dismiss_after: Duration) {
        self.status = MenuStatus::Copied {
            action,
            dismiss_at: now + dismiss_after,
        };
    }

    /// Records a failed copy; the menu stays open.
    pub fn copy_failed(&mut self, action: MenuAction, error: impl Into<String>) {
        self.status = MenuStatus::Failed {
            action,
            error: error.into(),
        };
    }

    /// Action to mark with a confirmation check, if any.
    pub fn confirmed_action(&self) -> Option<MenuAction> {
        match self.status {
            MenuStatus::Copied { action, .. } => Some(action),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            MenuStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// True when the confirmation delay has elapsed.
    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.status, MenuStatus::Copied { dismiss_at, .. } if now >= dismiss_at)
    }

    pub fn has_pending_dismiss(&self) -> bool {
        matches!(self.status, MenuStatus::Copied { .. })
    }
}

/// Owner of the single open menu of a tree view.
#[derive(Debug, Default)]
pub struct MenuSlot {
    next_id: u64,
    active: Option<ActionMenu>,
}

impl MenuSlot {
    /// Opens a menu for `(value, path)`, replacing any open menu.
    pub fn open(&mut self, path: NodePath, value: NodeValue, anchor: Anchor) -> MenuId {
        let id = MenuId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        if let Some(previous) = &self.active {
            tracing::debug!(previous = %previous.path, next = %path, "replacing open menu");
        }
        self.active = Some(ActionMenu {
            id,
            path,
            value,
            anchor,
            selected: 0,
            status: MenuStatus::Idle,
        });
        id
    }

    /// Closes the open menu, if any, and returns it.
    pub fn dismiss(&mut self) -> Option<ActionMenu> {
        self.active.take()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActionMenu> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActionMenu> {
        self.active.as_mut()
    }

    /// The open menu, only if it is the one identified by `id`.
    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut ActionMenu> {
        self.active.as_mut().filter(|menu| menu.id == id)
    }

    /// Dismisses the menu when its confirmation delay has elapsed.
    ///
    /// Returns true if the menu was closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.active.as_ref().is_some_and(|menu| menu.is_due(now)) {
            self.active = None;
            return true;
        }
        false
    }

    pub fn has_pending_dismiss(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(ActionMenu::has_pending_dismiss)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> NodeValue {
        NodeValue::from(json!({"user": {"name": "Ann", "tags": ["x", "y"]}}))
    }

    fn open_at(slot: &mut MenuSlot, root: &NodeValue, path: NodePath) -> MenuId {
        let value = root.get(&path).cloned().unwrap();
        slot.open(path, value, Anchor::default())
    }

    #[test]
    fn test_payloads_for_scenario() {
        let root = sample();
        let tag = NodePath::from(["user", "tags", "0"]);
        let name = NodePath::from(["user", "name"]);
        let tag_value = root.get(&tag).unwrap();
        let name_value = root.get(&name).unwrap();

        assert_eq!(MenuAction::CopyPath.payload(tag_value, &tag), "user.tags.0");
        assert_eq!(MenuAction::CopyValue.payload(name_value, &name), "\"Ann\"");
        assert_eq!(MenuAction::CopyRaw.payload(name_value, &name), "Ann");
    }

    #[test]
    fn test_copy_path_on_root_is_root_token() {
        let root = sample();
        assert_eq!(MenuAction::CopyPath.payload(&root, &NodePath::root()), "root");
    }

    #[test]
    fn test_second_open_replaces_first() {
        let root = sample();
        let mut slot = MenuSlot::default();
        let first = open_at(&mut slot, &root, NodePath::from(["user"]));
        let second = open_at(&mut slot, &root, NodePath::from(["user", "name"]));

        assert_ne!(first, second);
        assert!(slot.is_open());
        assert_eq!(slot.active().unwrap().path(), &NodePath::from(["user", "name"]));
        assert!(slot.get_mut(first).is_none());
        assert!(slot.get_mut(second).is_some());
    }

    #[test]
    fn test_success_dismisses_after_delay() {
        let root = sample();
        let mut slot = MenuSlot::default();
        let id = open_at(&mut slot, &root, NodePath::root());
        let request = slot.active_mut().unwrap().begin(MenuAction::CopyPath);
        assert_eq!(request.menu, id);
        assert_eq!(request.text, "root");

        let now = Instant::now();
        slot.get_mut(id)
            .unwrap()
            .copy_succeeded(MenuAction::CopyPath, now, DEFAULT_DISMISS_AFTER);
        assert_eq!(
            slot.active().unwrap().confirmed_action(),
            Some(MenuAction::CopyPath)
        );
        assert!(!slot.tick(now + Duration::from_millis(500)));
        assert!(slot.is_open());
        assert!(slot.tick(now + DEFAULT_DISMISS_AFTER));
        assert!(!slot.is_open());
    }

    #[test]
    fn test_failure_keeps_menu_open() {
        let root = sample();
        let mut slot = MenuSlot::default();
        let id = open_at(&mut slot, &root, NodePath::from(["user"]));
        slot.active_mut().unwrap().begin(MenuAction::CopyValue);
        slot.get_mut(id)
            .unwrap()
            .copy_failed(MenuAction::CopyValue, "denied");

        assert!(!slot.tick(Instant::now() + Duration::from_secs(60)));
        assert!(slot.is_open());
        assert_eq!(slot.active().unwrap().error(), Some("denied"));

        let retry = slot.active_mut().unwrap().begin(MenuAction::CopyValue);
        assert_eq!(retry.action, MenuAction::CopyValue);
        assert_eq!(slot.active().unwrap().error(), None);
    }

    #[test]
    fn test_stale_completion_after_dismiss_is_ignored() {
        let root = sample();
        let mut slot = MenuSlot::default();
        let id = open_at(&mut slot, &root, NodePath::root());
        slot.active_mut().unwrap().begin(MenuAction::CopyRaw);
        slot.dismiss();
        assert!(slot.get_mut(id).is_none());
    }

    #[test]
    fn test_hotkeys_map_to_actions() {
        assert_eq!(MenuAction::from_hotkey('v'), Some(MenuAction::CopyValue));
        assert_eq!(MenuAction::from_hotkey('R'), Some(MenuAction::CopyRaw));
        assert_eq!(MenuAction::from_hotkey('p'), Some(MenuAction::CopyPath));
        assert_eq!(MenuAction::from_hotkey('x'), None);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut slot = MenuSlot::default();
        slot.open(NodePath::root(), NodeValue::Null, Anchor::default());
        let menu = slot.active_mut().unwrap();
        menu.select_prev();
        assert_eq!(menu.selected, 0);
        for _ in 0..10 {
            menu.select_next();
        }
        assert_eq!(menu.selected, MenuAction::all().len() - 1);
        assert_eq!(menu.selected_action(), MenuAction::CopyPath);
    }
}
