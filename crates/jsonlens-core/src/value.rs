//! Tagged value model.
//!
//! `NodeValue` is built once, either streamed from text by [`crate::parse`]
//! or converted from a `serde_json::Value`, so the tree never has to inspect
//! shapes at render time. Object members keep insertion order and may repeat
//! a key.

use serde_json::{Map, Number, Value};

use crate::kind::{ContainerKind, NodeKind};
use crate::path::{NodeId, NodePath};

/// Default nesting depth past which containers are sealed.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A JSON-compatible value as seen by the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Null,
    Undefined,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<NodeValue>),
    Object(Vec<(String, NodeValue)>),
    /// A container whose members could not be read.
    ///
    /// Renders as an empty container of the given shape.
    Sealed(ContainerKind),
}

impl NodeValue {
    /// Builds an object from `(key, value)` pairs, keeping their order.
    pub fn object<K: Into<String>>(members: impl IntoIterator<Item = (K, NodeValue)>) -> Self {
        NodeValue::Object(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds an array.
    pub fn array(items: impl IntoIterator<Item = NodeValue>) -> Self {
        NodeValue::Array(items.into_iter().collect())
    }

    /// Builds a string value.
    pub fn string(s: impl Into<String>) -> Self {
        NodeValue::String(s.into())
    }

    /// Converts a JSON value, sealing containers nested deeper than `max_depth`.
    ///
    /// The root is depth 0; a container at depth `max_depth` is sealed.
    pub fn from_json_limited(value: &Value, max_depth: usize) -> Self {
        convert(value, 0, max_depth)
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeValue::Null => NodeKind::Null,
            NodeValue::Undefined => NodeKind::Undefined,
            NodeValue::Bool(_) => NodeKind::Boolean,
            NodeValue::Number(_) => NodeKind::Number,
            NodeValue::String(_) => NodeKind::String,
            NodeValue::Array(_) => NodeKind::Array,
            NodeValue::Object(_) => NodeKind::Object,
            NodeValue::Sealed(kind) => (*kind).into(),
        }
    }

    /// Looks up the node at `path`.
    ///
    /// With duplicate object keys the first member wins.
    pub fn get(&self, path: &NodePath) -> Option<&NodeValue> {
        let mut current = self;
        for segment in path.segments() {
            current = match current {
                NodeValue::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    items.get(index)?
                }
                NodeValue::Object(members) => {
                    members.iter().find(|(key, _)| key == segment).map(|(_, v)| v)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Looks up the node with entry positions `id`.
    ///
    /// Unlike [`NodeValue::get`] this tells duplicate keys apart.
    pub fn node(&self, id: &NodeId) -> Option<&NodeValue> {
        let mut current = self;
        for &position in id.positions() {
            current = match current {
                NodeValue::Array(items) => items.get(position)?,
                NodeValue::Object(members) => members.get(position).map(|(_, v)| v)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Converts back into a `serde_json::Value`.
    ///
    /// `Undefined` object members are omitted and `Undefined` array items
    /// become `null`, matching how JSON serializers treat missing values.
    /// Sealed containers serialize as empty containers.
    pub fn to_json(&self) -> Value {
        match self {
            NodeValue::Null | NodeValue::Undefined => Value::Null,
            NodeValue::Bool(b) => Value::Bool(*b),
            NodeValue::Number(n) => Value::Number(integral(n)),
            NodeValue::String(s) => Value::String(s.clone()),
            NodeValue::Array(items) => Value::Array(items.iter().map(NodeValue::to_json).collect()),
            NodeValue::Object(members) => {
                let mut map = Map::new();
                for (key, value) in members {
                    if matches!(value, NodeValue::Undefined) {
                        continue;
                    }
                    map.insert(key.clone(), value.to_json());
                }
                Value::Object(map)
            }
            NodeValue::Sealed(ContainerKind::Array) => Value::Array(Vec::new()),
            NodeValue::Sealed(ContainerKind::Object) => Value::Object(Map::new()),
        }
    }
}

/// Largest integer an f64 holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Rewrites integral floats such as `1.0` as integers so copied JSON reads
/// `1`, the same text the tree shows.
fn integral(n: &Number) -> Number {
    match n.as_f64().filter(|f| n.is_f64() && f.fract() == 0.0) {
        Some(f) if f.abs() <= MAX_SAFE_INTEGER => Number::from(f as i64),
        _ => n.clone(),
    }
}

fn convert(value: &Value, depth: usize, max_depth: usize) -> NodeValue {
    match value {
        Value::Null => NodeValue::Null,
        Value::Bool(b) => NodeValue::Bool(*b),
        Value::Number(n) => NodeValue::Number(n.clone()),
        Value::String(s) => NodeValue::String(s.clone()),
        Value::Array(_) if depth >= max_depth => {
            tracing::debug!(depth, "sealing array past depth limit");
            NodeValue::Sealed(ContainerKind::Array)
        }
        Value::Object(_) if depth >= max_depth => {
            tracing::debug!(depth, "sealing object past depth limit");
            NodeValue::Sealed(ContainerKind::Object)
        }
        Value::Array(items) => NodeValue::Array(
            items
                .iter()
                .map(|item| convert(item, depth + 1, max_depth))
                .collect(),
        ),
        Value::Object(map) => NodeValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), convert(v, depth + 1, max_depth)))
                .collect(),
        ),
    }
}

impl From<Value> for NodeValue {
    fn from(value: Value) -> Self {
        NodeValue::from_json_limited(&value, DEFAULT_MAX_DEPTH)
    }
}

impl From<&Value> for NodeValue {
    fn from(value: &Value) -> Self {
        NodeValue::from_json_limited(value, DEFAULT_MAX_DEPTH)
    }
}
