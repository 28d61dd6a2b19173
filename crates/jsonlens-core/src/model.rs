//! Tree model: classification, entries, preview and formatting.
//!
//! Every function here is total. Containers whose members cannot be read
//! (`NodeValue::Sealed`) behave as empty containers; nothing in this module
//! returns an error or panics on odd input.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::kind::NodeKind;
use crate::value::NodeValue;

/// One child of a container: its key (object key or decimal index) and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    pub key: Cow<'a, str>,
    pub value: &'a NodeValue,
}

/// Nouns used in the collapsed object preview (`{1 property}`, `{2 properties}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewNouns {
    pub singular: String,
    pub plural: String,
}

impl Default for PreviewNouns {
    fn default() -> Self {
        Self {
            singular: "property".to_string(),
            plural: "properties".to_string(),
        }
    }
}

/// Classifies a value.
pub fn classify(value: &NodeValue) -> NodeKind {
    value.kind()
}

/// Number of readable child entries (0 for primitives and sealed containers).
pub fn entry_count(value: &NodeValue) -> usize {
    match value {
        NodeValue::Array(items) => items.len(),
        NodeValue::Object(members) => members.len(),
        _ => 0,
    }
}

/// Returns true when the value is a container with at least one entry.
///
/// Gates whether a disclosure control is shown at all.
pub fn has_entries(value: &NodeValue) -> bool {
    entry_count(value) > 0
}

/// Child entries in display order.
pub fn entries(value: &NodeValue) -> Vec<Entry<'_>> {
    match value {
        NodeValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| Entry {
                key: Cow::Owned(index.to_string()),
                value,
            })
            .collect(),
        NodeValue::Object(members) => members
            .iter()
            .map(|(key, value)| Entry {
                key: Cow::Borrowed(key.as_str()),
                value,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// One-line summary shown while a container is collapsed.
///
/// Returns `None` for primitives, whose formatted value is always visible.
pub fn preview(value: &NodeValue, nouns: &PreviewNouns) -> Option<String> {
    match classify(value) {
        NodeKind::Array => Some(format!("Array({})", entry_count(value))),
        NodeKind::Object => {
            let count = entry_count(value);
            Some(match count {
                0 => "{}".to_string(),
                1 => format!("{{1 {}}}", nouns.singular),
                n => format!("{{{n} {}}}", nouns.plural),
            })
        }
        _ => None,
    }
}

/// Canonical single-line rendering used in rows and by "Copy Value".
///
/// Strings are wrapped in double quotes without escaping. Containers render
/// as two-space pretty JSON, so the result is single-line only for
/// primitives.
pub fn format(value: &NodeValue) -> String {
    match value {
        NodeValue::String(s) => format!("\"{s}\""),
        NodeValue::Array(_) | NodeValue::Object(_) | NodeValue::Sealed(_) => {
            serde_json::to_string_pretty(&value.to_json()).unwrap_or_default()
        }
        _ => primitive_text(value),
    }
}

/// Unformatted string conversion used by "Copy Raw Value".
///
/// Strings are returned without quotes; containers as compact JSON.
pub fn raw(value: &NodeValue) -> String {
    match value {
        NodeValue::String(s) => s.clone(),
        NodeValue::Array(_) | NodeValue::Object(_) | NodeValue::Sealed(_) => {
            serde_json::to_string(&value.to_json()).unwrap_or_default()
        }
        _ => primitive_text(value),
    }
}

fn primitive_text(value: &NodeValue) -> String {
    match value {
        NodeValue::Null => "null".to_string(),
        NodeValue::Undefined => "undefined".to_string(),
        NodeValue::Bool(b) => b.to_string(),
        NodeValue::Number(n) => number_text(n),
        NodeValue::String(s) => s.clone(),
        NodeValue::Array(_) | NodeValue::Object(_) | NodeValue::Sealed(_) => String::new(),
    }
}

/// Shortest text for `n`, in the form JavaScript's `String(n)` prints.
///
/// Integral floats drop the fraction (`1.0` is `1`). Magnitudes of `1e21`
/// and above, or below `1e-6`, switch to exponent form with a signed
/// exponent (`1e+21`, `1.5e-7`).
pub fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64().filter(|_| n.is_f64()) {
        Some(f) => float_text(f),
        None => n.to_string(),
    }
}

fn float_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&f.abs()) {
        return f.to_string();
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::kind::ContainerKind;

    fn nouns() -> PreviewNouns {
        PreviewNouns::default()
    }

    #[test]
    fn test_classify_basic_values() {
        assert_eq!(classify(&NodeValue::Null), NodeKind::Null);
        assert_eq!(classify(&NodeValue::Undefined), NodeKind::Undefined);
        assert_eq!(classify(&NodeValue::from(json!([]))), NodeKind::Array);
        assert_eq!(classify(&NodeValue::from(json!({}))), NodeKind::Object);
        assert_eq!(classify(&NodeValue::from(json!("s"))), NodeKind::String);
        assert_eq!(classify(&NodeValue::from(json!(1.5))), NodeKind::Number);
        assert_eq!(classify(&NodeValue::from(json!(false))), NodeKind::Boolean);
    }

    #[test]
    fn test_classify_sealed_keeps_container_kind() {
        assert_eq!(
            classify(&NodeValue::Sealed(ContainerKind::Object)),
            NodeKind::Object
        );
        assert_eq!(
            classify(&NodeValue::Sealed(ContainerKind::Array)),
            NodeKind::Array
        );
    }

    #[test]
    fn test_has_entries_matches_entries_len() {
        let samples = [
            json!([]),
            json!([1]),
            json!({}),
            json!({"a": 1}),
            json!(null),
            json!("x"),
            json!(3),
        ];
        for sample in samples {
            let value = NodeValue::from(sample);
            assert_eq!(has_entries(&value), !entries(&value).is_empty());
        }
        let sealed = NodeValue::Sealed(ContainerKind::Object);
        assert_eq!(has_entries(&sealed), !entries(&sealed).is_empty());
    }

    #[test]
    fn test_array_entries_use_ascending_index_keys() {
        let value = NodeValue::from(json!(["a", "b", "c"]));
        let keys: Vec<_> = entries(&value).into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_object_entries_keep_duplicates_in_order() {
        let value = NodeValue::object([
            ("b", NodeValue::Null),
            ("a", NodeValue::Null),
            ("b", NodeValue::Bool(true)),
        ]);
        let keys: Vec<_> = entries(&value).into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_preview_texts() {
        let n = nouns();
        assert_eq!(
            preview(&NodeValue::from(json!([1, 2, 3])), &n).as_deref(),
            Some("Array(3)")
        );
        assert_eq!(
            preview(&NodeValue::from(json!({"a": 1, "b": 2})), &n).as_deref(),
            Some("{2 properties}")
        );
        assert_eq!(
            preview(&NodeValue::from(json!({"a": 1})), &n).as_deref(),
            Some("{1 property}")
        );
        assert_eq!(
            preview(&NodeValue::from(json!({})), &n).as_deref(),
            Some("{}")
        );
        assert_eq!(preview(&NodeValue::from(json!(1)), &n), None);
    }

    #[test]
    fn test_preview_uses_configured_nouns() {
        let n = PreviewNouns {
            singular: "key".to_string(),
            plural: "keys".to_string(),
        };
        assert_eq!(
            preview(&NodeValue::from(json!({"a": 1, "b": 2})), &n).as_deref(),
            Some("{2 keys}")
        );
    }

    #[test]
    fn test_sealed_object_previews_as_empty() {
        let sealed = NodeValue::Sealed(ContainerKind::Object);
        assert_eq!(preview(&sealed, &nouns()).as_deref(), Some("{}"));
        assert_eq!(format(&sealed), "{}");
    }

    #[test]
    fn test_format_primitives() {
        assert_eq!(format(&NodeValue::string("Ann")), "\"Ann\"");
        assert_eq!(format(&NodeValue::Null), "null");
        assert_eq!(format(&NodeValue::Undefined), "undefined");
        assert_eq!(format(&NodeValue::Bool(true)), "true");
        assert_eq!(format(&NodeValue::from(json!(42))), "42");
        assert_eq!(format(&NodeValue::from(json!(-0.5))), "-0.5");
    }

    #[test]
    fn test_number_text_matches_script_output() {
        let cases = [
            ("1.0", "1"),
            ("1e2", "100"),
            ("-0.0", "0"),
            ("0.1", "0.1"),
            ("123456789012345680000", "123456789012345680000"),
            ("1e21", "1e+21"),
            ("1.5e300", "1.5e+300"),
            ("0.000001", "0.000001"),
            ("1.5e-7", "1.5e-7"),
            ("-2.5e-8", "-2.5e-8"),
            ("18446744073709551615", "18446744073709551615"),
            ("-7", "-7"),
        ];
        for (input, expected) in cases {
            let n: serde_json::Number = serde_json::from_str(input).unwrap();
            assert_eq!(number_text(&n), expected, "input {input}");
        }
    }

    #[test]
    fn test_format_does_not_escape_quotes() {
        assert_eq!(format(&NodeValue::string("say \"hi\"")), "\"say \"hi\"\"");
    }

    #[test]
    fn test_format_container_is_pretty_json() {
        let value = NodeValue::from(json!({"a": [1]}));
        assert_eq!(format(&value), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_raw_strips_quotes_and_compacts_containers() {
        assert_eq!(raw(&NodeValue::string("Ann")), "Ann");
        assert_eq!(raw(&NodeValue::Null), "null");
        assert_eq!(raw(&NodeValue::from(json!({"a": [1, 2]}))), r#"{"a":[1,2]}"#);
    }
}
