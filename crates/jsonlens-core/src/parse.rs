//! Streaming JSON parser into [`NodeValue`].
//!
//! serde_json caps nesting at 128 levels by default. Here the cap is lifted
//! and `serde_stacker` grows the stack on demand, so any well-formed input
//! parses. Containers at `max_depth` are skipped and come back sealed, which
//! keeps the resulting tree shallow enough for the UI.

use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::Number;

use crate::kind::ContainerKind;
use crate::value::NodeValue;

/// Parses `text` as one JSON document.
///
/// The root is depth 0; a container at depth `max_depth` is sealed.
/// Duplicate object keys are kept in document order.
pub fn parse_limited(text: &str, max_depth: usize) -> Result<NodeValue, serde_json::Error> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let value = Seed {
        depth: 0,
        max_depth,
    }
    .deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

#[derive(Clone, Copy)]
struct Seed {
    depth: usize,
    max_depth: usize,
}

impl Seed {
    fn is_sealed(self) -> bool {
        self.depth >= self.max_depth
    }

    fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }
}

impl<'de> DeserializeSeed<'de> for Seed {
    type Value = NodeValue;

    fn deserialize<D>(self, deserializer: D) -> Result<NodeValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Seed {
    type Value = NodeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<NodeValue, E> {
        Ok(NodeValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<NodeValue, E> {
        Ok(NodeValue::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<NodeValue, E> {
        Ok(NodeValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeValue, E> {
        Ok(NodeValue::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeValue, E> {
        Ok(NodeValue::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<NodeValue, E> {
        Number::from_f64(v)
            .map(NodeValue::Number)
            .ok_or_else(|| E::custom("number out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeValue, E> {
        Ok(NodeValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<NodeValue, E> {
        Ok(NodeValue::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<NodeValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        if self.is_sealed() {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            tracing::debug!(depth = self.depth, "sealing array past depth limit");
            return Ok(NodeValue::Sealed(ContainerKind::Array));
        }

        let child = self.child();
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(child)? {
            items.push(item);
        }
        Ok(NodeValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<NodeValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        if self.is_sealed() {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            tracing::debug!(depth = self.depth, "sealing object past depth limit");
            return Ok(NodeValue::Sealed(ContainerKind::Object));
        }

        let child = self.child();
        let mut members = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(child)?;
            members.push((key, value));
        }
        Ok(NodeValue::Object(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::NodeId;
    use crate::value::DEFAULT_MAX_DEPTH;

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_parses_scalars_and_containers() {
        let value = parse_limited(r#"{"a":[1,-2,2.5,true,null,"s"],"b":{}}"#, 8).unwrap();
        assert_eq!(
            value,
            NodeValue::object([
                (
                    "a",
                    NodeValue::array([
                        NodeValue::Number(1.into()),
                        NodeValue::Number((-2).into()),
                        NodeValue::Number(Number::from_f64(2.5).unwrap()),
                        NodeValue::Bool(true),
                        NodeValue::Null,
                        NodeValue::string("s"),
                    ])
                ),
                ("b", NodeValue::Object(Vec::new())),
            ])
        );
    }

    #[test]
    fn test_duplicate_keys_are_kept_in_order() {
        let value = parse_limited(r#"{"k":[true],"k":[false,null]}"#, 8).unwrap();
        let NodeValue::Object(members) = &value else {
            panic!("expected object");
        };
        let keys: Vec<_> = members.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["k", "k"]);
        assert_eq!(
            value.node(&NodeId::from([1])),
            Some(&NodeValue::array([NodeValue::Bool(false), NodeValue::Null]))
        );
    }

    #[test]
    fn test_nesting_past_serde_json_default_limit_parses() {
        let value = parse_limited(&nested_arrays(200), DEFAULT_MAX_DEPTH).unwrap();
        let mut current = &value;
        let mut depth = 0;
        while let NodeValue::Array(items) = current {
            match items.first() {
                Some(item) => current = item,
                None => break,
            }
            depth += 1;
        }
        assert_eq!(depth, 199);
    }

    #[test]
    fn test_containers_at_max_depth_are_sealed() {
        let value = parse_limited(&nested_arrays(600), DEFAULT_MAX_DEPTH).unwrap();
        let id = NodeId::from([0; DEFAULT_MAX_DEPTH]);
        assert_eq!(value.node(&id), Some(&NodeValue::Sealed(ContainerKind::Array)));

        let value = parse_limited(r#"{"a":{"b":{"c":1}}}"#, 1).unwrap();
        assert_eq!(
            value,
            NodeValue::object([("a", NodeValue::Sealed(ContainerKind::Object))])
        );
    }

    #[test]
    fn test_sealed_content_is_still_validated() {
        assert!(parse_limited(r#"{"a":{"b":[1,}}}"#, 1).is_err());
    }

    #[test]
    fn test_trailing_characters_are_rejected() {
        assert!(parse_limited("[1] x", 8).is_err());
        assert!(parse_limited("", 8).is_err());
    }
}
