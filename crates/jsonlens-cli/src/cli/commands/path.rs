//! Prints a single node by dotted path.

use std::path::Path;

use anyhow::{Result, bail};
use jsonlens_core::config::Config;
use jsonlens_core::{NodePath, model};

use crate::cli::input;

pub fn run(file: Option<&Path>, dotted: &str, config: &Config) -> Result<()> {
    let doc = input::load(file, config)?;
    let path = NodePath::parse_dotted(dotted);
    let Some(node) = doc.root.get(&path) else {
        bail!("No node at path '{}' in {}", path.dotted(), doc.source);
    };
    println!("{}", model::format(node));
    Ok(())
}
