//! Interactive explorer command.

use std::path::Path;

use anyhow::Result;
use jsonlens_core::config::Config;

use crate::cli::input;

#[cfg(feature = "tui")]
pub async fn run(file: Option<&Path>, config: &Config) -> Result<()> {
    let doc = input::load(file, config)?;
    jsonlens_tui::run_explorer(config, doc.root, &doc.source).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(file: Option<&Path>, config: &Config) -> Result<()> {
    // parse anyway so bad input is still reported
    input::load(file, config)?;
    anyhow::bail!("This build has no interactive explorer.\nUse `jsonlens print` instead.")
}
