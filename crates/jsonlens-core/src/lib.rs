//! Core jsonlens library (value model, tree layout, action menu, config).

pub mod config;
pub mod expansion;
pub mod kind;
pub mod layout;
pub mod menu;
pub mod model;
pub mod parse;
pub mod path;
pub mod value;

pub use config::{ClipboardMode, Config};
pub use expansion::ExpansionState;
pub use kind::{ContainerKind, NodeKind};
pub use layout::{Disclosure, LayoutOptions, Row, RowBody, find_node, layout};
pub use menu::{ActionMenu, Anchor, CopyRequest, MenuAction, MenuId, MenuSlot, MenuStatus};
pub use parse::parse_limited;
pub use path::{NodeId, NodePath};
pub use value::NodeValue;
