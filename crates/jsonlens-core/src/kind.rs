//! Node classification kinds.

use std::fmt;

/// Closed classification of a [`NodeValue`](crate::NodeValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    /// A missing field, distinct from an explicit `null`.
    Undefined,
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl NodeKind {
    /// Returns true for kinds that can hold child entries.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Object)
    }

    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Undefined => "undefined",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }

    /// Opening bracket for container kinds.
    pub fn open_bracket(self) -> Option<char> {
        match self {
            NodeKind::Array => Some('['),
            NodeKind::Object => Some('{'),
            _ => None,
        }
    }

    /// Closing bracket for container kinds.
    pub fn close_bracket(self) -> Option<char> {
        match self {
            NodeKind::Array => Some(']'),
            NodeKind::Object => Some('}'),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which container shape a sealed value had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Array,
    Object,
}

impl From<ContainerKind> for NodeKind {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Array => NodeKind::Array,
            ContainerKind::Object => NodeKind::Object,
        }
    }
}
