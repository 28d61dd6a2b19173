//! Tree layout: turns a value plus expansion state into display rows.
//!
//! The walk uses an explicit stack instead of recursion, so arbitrarily deep
//! inputs cannot overflow the call stack. Only expanded, non-empty containers
//! are descended into; collapsed subtrees cost nothing.
//!
//! ## Row shapes
//!
//! ```text
//!   ▾ user: {                  container, expanded
//!         name: "Ann"          leaf
//!       ▸ tags: [ Array(2) ]   container, collapsed (preview inline)
//!         meta: {}             empty container (no disclosure)
//!     }                        closing row at the parent's indentation
//! ```

use crate::expansion::ExpansionState;
use crate::kind::NodeKind;
use crate::model::{self, PreviewNouns};
use crate::path::{NodeId, NodePath};
use crate::value::NodeValue;

/// Default indentation step per depth level, in columns.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Columns of indentation per depth level.
    pub indent_width: usize,
    pub nouns: PreviewNouns,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            nouns: PreviewNouns::default(),
        }
    }
}

/// Disclosure affordance of a container row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    /// Leaf or empty container: nothing to open.
    None,
    Collapsed,
    Expanded,
}

impl Disclosure {
    pub fn glyph(self) -> &'static str {
        match self {
            Disclosure::None => " ",
            Disclosure::Collapsed => "▸",
            Disclosure::Expanded => "▾",
        }
    }
}

/// Text that closes a container on its own row (collapsed or empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineTail {
    /// Shown only for collapsed, non-empty containers.
    pub preview: Option<String>,
    pub close: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowBody {
    Leaf {
        text: String,
    },
    Container {
        open: char,
        disclosure: Disclosure,
        tail: Option<InlineTail>,
    },
    /// Closing bracket after the last child of an expanded container.
    Close {
        bracket: char,
    },
}

/// One visual line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub path: NodePath,
    pub depth: usize,
    /// Leading columns for this row.
    pub indent: usize,
    pub kind: NodeKind,
    pub body: RowBody,
}

impl Row {
    /// Display name: the node's key, `None` for the root and closing rows.
    pub fn name(&self) -> Option<&str> {
        if self.is_closing() {
            return None;
        }
        self.path.key()
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.body, RowBody::Close { .. })
    }

    pub fn disclosure(&self) -> Disclosure {
        match &self.body {
            RowBody::Container { disclosure, .. } => *disclosure,
            _ => Disclosure::None,
        }
    }

    /// True when clicking the row changes its expansion state.
    pub fn is_toggleable(&self) -> bool {
        self.disclosure() != Disclosure::None
    }

    /// True for rows that represent a node (and can own an action menu).
    pub fn is_node(&self) -> bool {
        !self.is_closing()
    }

    /// Plain-text rendering without styles.
    pub fn plain_text(&self) -> String {
        let mut out = " ".repeat(self.indent);
        if !self.is_closing() {
            out.push_str(self.disclosure().glyph());
            out.push(' ');
        } else {
            out.push_str("  ");
        }
        if let Some(name) = self.name() {
            out.push_str(name);
            out.push_str(": ");
        }
        match &self.body {
            RowBody::Leaf { text } => out.push_str(text),
            RowBody::Container { open, tail, .. } => {
                out.push(*open);
                if let Some(tail) = tail {
                    if let Some(preview) = &tail.preview {
                        out.push(' ');
                        out.push_str(preview);
                        out.push(' ');
                    }
                    out.push(tail.close);
                }
            }
            RowBody::Close { bracket } => out.push(*bracket),
        }
        out
    }
}

enum Work<'a> {
    Visit {
        value: &'a NodeValue,
        id: NodeId,
        path: NodePath,
    },
    Close {
        id: NodeId,
        path: NodePath,
        kind: NodeKind,
        bracket: char,
    },
}

/// Lays out the visible rows for `root`.
pub fn layout(root: &NodeValue, expansion: &ExpansionState, options: &LayoutOptions) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut stack = vec![Work::Visit {
        value: root,
        id: NodeId::root(),
        path: NodePath::root(),
    }];

    while let Some(work) = stack.pop() {
        match work {
            Work::Visit { value, id, path } => {
                let depth = path.depth();
                let indent = depth * options.indent_width;
                let kind = model::classify(value);

                let (Some(open), Some(close)) = (kind.open_bracket(), kind.close_bracket()) else {
                    rows.push(Row {
                        id,
                        path,
                        depth,
                        indent,
                        kind,
                        body: RowBody::Leaf {
                            text: model::format(value),
                        },
                    });
                    continue;
                };

                if !model::has_entries(value) {
                    rows.push(Row {
                        id,
                        path,
                        depth,
                        indent,
                        kind,
                        body: RowBody::Container {
                            open,
                            disclosure: Disclosure::None,
                            tail: Some(InlineTail {
                                preview: None,
                                close,
                            }),
                        },
                    });
                    continue;
                }

                if !expansion.is_expanded(&id) {
                    rows.push(Row {
                        id,
                        path,
                        depth,
                        indent,
                        kind,
                        body: RowBody::Container {
                            open,
                            disclosure: Disclosure::Collapsed,
                            tail: Some(InlineTail {
                                preview: model::preview(value, &options.nouns),
                                close,
                            }),
                        },
                    });
                    continue;
                }

                rows.push(Row {
                    id: id.clone(),
                    path: path.clone(),
                    depth,
                    indent,
                    kind,
                    body: RowBody::Container {
                        open,
                        disclosure: Disclosure::Expanded,
                        tail: None,
                    },
                });

                stack.push(Work::Close {
                    id: id.clone(),
                    path: path.clone(),
                    kind,
                    bracket: close,
                });
                let children = model::entries(value);
                for (position, entry) in children.into_iter().enumerate().rev() {
                    stack.push(Work::Visit {
                        value: entry.value,
                        id: id.child(position),
                        path: path.child(entry.key.into_owned()),
                    });
                }
            }
            Work::Close {
                id,
                path,
                kind,
                bracket,
            } => {
                let depth = path.depth();
                rows.push(Row {
                    indent: depth * options.indent_width,
                    id,
                    path,
                    depth,
                    kind,
                    body: RowBody::Close { bracket },
                });
            }
        }
    }

    rows
}

/// Index of the node row for `id` (never a closing row).
pub fn find_node(rows: &[Row], id: &NodeId) -> Option<usize> {
    rows.iter().position(|row| row.is_node() && row.id == *id)
}
