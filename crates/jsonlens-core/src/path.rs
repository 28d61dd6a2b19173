//! Node paths.
//!
//! A path is the list of keys (object) or decimal indexes (array) from the
//! root to a node. Paths are derived while walking the tree, never stored on
//! the value itself.
//!
//! Object keys may repeat, so a `NodePath` does not always name one node.
//! `NodeId` is the unambiguous form: the entry position at every level. Rows
//! carry both; expansion state and value lookup use the id, while the dotted
//! path is what users see and copy.

use std::fmt;

/// Token copied for the root node, whose path has no segments.
pub const ROOT_TOKEN: &str = "root";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// The empty (root) path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns this path with `key` appended.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(key.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment (the node's own key), `None` for the root.
    pub fn key(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Number of segments; equals the node's depth.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments joined by `.`, or `root` for the empty path.
    pub fn dotted(&self) -> String {
        if self.is_root() {
            return ROOT_TOKEN.to_string();
        }
        self.0.join(".")
    }

    /// Parses the dotted form produced by [`NodePath::dotted`].
    ///
    /// `root` and the empty string both parse to the root path. Keys that
    /// themselves contain `.` cannot be told apart from nested keys.
    pub fn parse_dotted(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == ROOT_TOKEN {
            return Self::root();
        }
        Self(s.split('.').map(str::to_string).collect())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl From<Vec<String>> for NodePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<const N: usize> From<[&str; N]> for NodePath {
    fn from(segments: [&str; N]) -> Self {
        Self(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Entry positions from the root to a node; the root is empty.
///
/// Unlike [`NodePath`], sibling members sharing a key get distinct ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeId(Vec<usize>);

impl NodeId {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Id of the entry at `position` inside this node.
    #[must_use]
    pub fn child(&self, position: usize) -> Self {
        let mut positions = Vec::with_capacity(self.0.len() + 1);
        positions.extend_from_slice(&self.0);
        positions.push(position);
        Self(positions)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl<const N: usize> From<[usize; N]> for NodeId {
    fn from(positions: [usize; N]) -> Self {
        Self(positions.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty_and_dotted_as_root() {
        let root = NodePath::root();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.dotted(), "root");
        assert_eq!(root.key(), None);
    }

    #[test]
    fn test_child_appends_one_segment() {
        let parent = NodePath::from(["user"]);
        let child = parent.child("tags");
        assert_eq!(child.segments(), &["user".to_string(), "tags".to_string()]);
        assert_eq!(child.key(), Some("tags"));
        assert_eq!(parent.segments().len() + 1, child.segments().len());
    }

    #[test]
    fn test_dotted_joins_segments() {
        let path = NodePath::root().child("user").child("tags").child("0");
        assert_eq!(path.dotted(), "user.tags.0");
        assert_eq!(path.to_string(), "user.tags.0");
    }

    #[test]
    fn test_parse_dotted_inverts_dotted() {
        assert_eq!(NodePath::parse_dotted("root"), NodePath::root());
        assert_eq!(NodePath::parse_dotted(""), NodePath::root());
        assert_eq!(
            NodePath::parse_dotted("a.b.2"),
            NodePath::from(["a", "b", "2"])
        );
    }

    #[test]
    fn test_node_id_child_and_parent() {
        let id = NodeId::root().child(1).child(0);
        assert_eq!(id, NodeId::from([1, 0]));
        assert_eq!(id.depth(), 2);
        assert_eq!(id.parent(), Some(NodeId::from([1])));
        assert_eq!(NodeId::root().parent(), None);
    }
}
