//! Full-screen tree explorer for jsonlens.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr, stdout};

use anyhow::Result;
use jsonlens_core::NodeValue;
use jsonlens_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive explorer over `root` until the user quits.
///
/// `source` names the input (file name or `stdin`) for the status line.
pub async fn run_explorer(config: &Config, root: NodeValue, source: &str) -> Result<()> {
    // the explorer draws on stdout and needs a terminal to read keys from
    if !stdout().is_terminal() || !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `jsonlens print` for non-interactive output."
        );
    }

    tracing::info!(source, "starting explorer");
    let mut runtime = TuiRuntime::new(config.clone(), root, source.to_string())?;
    runtime.run()
}
