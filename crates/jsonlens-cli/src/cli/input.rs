//! Loading the JSON document from a file or stdin.

use std::fs;
use std::io::{IsTerminal, Read, stdin};
use std::path::Path;

use anyhow::{Context, Result, bail};
use jsonlens_core::NodeValue;
use jsonlens_core::config::Config;

/// Source name shown for piped input.
pub const STDIN_NAME: &str = "stdin";

/// A parsed document plus the name it was read from.
pub struct Document {
    pub root: NodeValue,
    pub source: String,
}

/// Reads `file`, or stdin when `file` is `-` or omitted with piped input.
pub fn load(file: Option<&Path>, config: &Config) -> Result<Document> {
    let (text, source) = match file {
        Some(path) if path != Path::new("-") => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (text, path.display().to_string())
        }
        Some(_) => (read_stdin()?, STDIN_NAME.to_string()),
        None => {
            if stdin().is_terminal() {
                bail!("No input. Pass a FILE or pipe JSON on stdin.");
            }
            (read_stdin()?, STDIN_NAME.to_string())
        }
    };

    let root = parse(&text, config.max_depth)
        .with_context(|| format!("Failed to parse JSON from {source}"))?;
    tracing::debug!(source = %source, bytes = text.len(), "loaded document");

    Ok(Document { root, source })
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

/// Parses JSON text, sealing containers past `max_depth`.
pub fn parse(text: &str, max_depth: usize) -> Result<NodeValue> {
    Ok(jsonlens_core::parse_limited(text, max_depth)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_member_order() {
        let root = parse(r#"{"b": 1, "a": 2}"#, 16).unwrap();
        let NodeValue::Object(members) = root else {
            panic!("expected object");
        };
        let keys: Vec<_> = members.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_accepts_deep_nesting() {
        let text = format!("{}{}", "[".repeat(300), "]".repeat(300));
        let root = parse(&text, 256).unwrap();
        assert!(matches!(root, NodeValue::Array(ref items) if items.len() == 1));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(parse("{not json", 16).is_err());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "[1, 2]").unwrap();

        let doc = load(Some(&path), &Config::default()).unwrap();
        assert_eq!(doc.source, path.display().to_string());
        assert!(matches!(doc.root, NodeValue::Array(ref items) if items.len() == 2));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = load(Some(Path::new("/nonexistent/doc.json")), &Config::default())
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("/nonexistent/doc.json"));
    }
}
