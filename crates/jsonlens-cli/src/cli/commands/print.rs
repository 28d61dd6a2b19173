//! Non-interactive tree printing.

use std::io::{Write, stdout};
use std::path::Path;

use anyhow::Result;
use jsonlens_core::config::Config;
use jsonlens_core::{ExpansionState, NodeValue, layout};

use crate::cli::input;

pub fn run(file: Option<&Path>, expand_all: bool, config: &Config) -> Result<()> {
    let doc = input::load(file, config)?;
    let mut out = stdout().lock();
    for line in render_lines(&doc.root, expand_all, config) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// Rows of the layout as plain text, one per line.
pub fn render_lines(root: &NodeValue, expand_all: bool, config: &Config) -> Vec<String> {
    let expand_depth = if expand_all {
        usize::MAX
    } else {
        config.expand_depth
    };
    let expansion = ExpansionState::new(expand_depth);
    layout(root, &expansion, &config.layout_options())
        .iter()
        .map(|row| row.plain_text().trim_end().to_string())
        .collect()
}
