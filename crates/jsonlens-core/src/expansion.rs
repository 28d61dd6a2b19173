//! Per-node expansion state.
//!
//! Nodes start from a depth rule (shallow nodes open, deeper nodes closed)
//! and only explicit toggles are stored, keyed by node id. Toggling one node
//! never touches another node's entry, even a sibling with the same key.

use std::collections::HashMap;

use crate::path::NodeId;

/// Default depth below which nodes start expanded (root and its children).
pub const DEFAULT_EXPAND_DEPTH: usize = 2;

#[derive(Debug, Clone)]
pub struct ExpansionState {
    expand_depth: usize,
    overrides: HashMap<NodeId, bool>,
}

impl Default for ExpansionState {
    fn default() -> Self {
        Self::new(DEFAULT_EXPAND_DEPTH)
    }
}

impl ExpansionState {
    /// Creates a state where nodes with `depth < expand_depth` start expanded.
    pub fn new(expand_depth: usize) -> Self {
        Self {
            expand_depth,
            overrides: HashMap::new(),
        }
    }

    /// Initial state for a node at `depth`, before any toggle.
    pub fn default_for_depth(&self, depth: usize) -> bool {
        depth < self.expand_depth
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.overrides
            .get(id)
            .copied()
            .unwrap_or_else(|| self.default_for_depth(id.depth()))
    }

    /// Flips the node `id` and returns its new state.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        let next = !self.is_expanded(id);
        self.set(id, next);
        next
    }

    pub fn set(&mut self, id: &NodeId, expanded: bool) {
        if expanded == self.default_for_depth(id.depth()) {
            self.overrides.remove(id);
        } else {
            self.overrides.insert(id.clone(), expanded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_rule_defaults() {
        let state = ExpansionState::default();
        assert!(state.is_expanded(&NodeId::root()));
        assert!(state.is_expanded(&NodeId::from([0])));
        assert!(!state.is_expanded(&NodeId::from([0, 1])));
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let mut state = ExpansionState::default();
        let a = NodeId::from([0]);
        let b = NodeId::from([1]);
        let ab = NodeId::from([0, 1]);

        assert!(!state.toggle(&a));
        assert!(!state.is_expanded(&a));
        assert!(state.is_expanded(&b));
        assert!(state.is_expanded(&NodeId::root()));
        assert!(!state.is_expanded(&ab));

        assert!(state.toggle(&ab));
        assert!(!state.is_expanded(&a));
        assert!(state.is_expanded(&ab));
    }

    #[test]
    fn test_toggle_twice_restores_default() {
        let mut state = ExpansionState::default();
        let id = NodeId::from([2, 0, 4]);
        assert!(state.toggle(&id));
        assert!(!state.toggle(&id));
        assert!(!state.is_expanded(&id));
        assert!(state.overrides.is_empty());
    }

    #[test]
    fn test_custom_expand_depth() {
        let state = ExpansionState::new(0);
        assert!(!state.is_expanded(&NodeId::root()));
        let state = ExpansionState::new(3);
        assert!(state.is_expanded(&NodeId::from([0, 0])));
        assert!(!state.is_expanded(&NodeId::from([0, 0, 0])));
    }

    #[test]
    fn test_set_to_current_state_is_a_no_op() {
        let mut state = ExpansionState::default();
        state.set(&NodeId::root(), true);
        assert!(state.overrides.is_empty());
        state.set(&NodeId::root(), false);
        assert!(!state.is_expanded(&NodeId::root()));
    }
}
