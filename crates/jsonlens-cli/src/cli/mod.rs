//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jsonlens_core::config;

use crate::logging;

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "jsonlens")]
#[command(version = "0.1")]
#[command(about = "Interactive JSON tree explorer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file to explore (`-` reads stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(flatten)]
    view: ViewArgs,
}

/// Layout overrides shared by every command that shows a tree.
#[derive(clap::Args, Debug, Clone, Default)]
struct ViewArgs {
    /// Nodes shallower than this start expanded
    #[arg(long, global = true, value_name = "N", env = "JSONLENS_EXPAND_DEPTH")]
    expand_depth: Option<usize>,

    /// Columns per nesting level
    #[arg(long = "indent", global = true, value_name = "N")]
    indent_width: Option<usize>,
}

impl ViewArgs {
    fn apply(&self, config: &mut config::Config) {
        if let Some(depth) = self.expand_depth {
            config.expand_depth = depth;
        }
        if let Some(width) = self.indent_width {
            config.indent_width = width;
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the tree as plain text
    Print {
        /// JSON file to print (`-` reads stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Expand every container
        #[arg(long)]
        expand_all: bool,
    },

    /// Print the node at a dotted path
    Path {
        /// Dotted path such as `user.tags.0` (`root` for the whole document)
        #[arg(value_name = "PATH")]
        path: String,

        /// JSON file to read (`-` reads stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::Config::load().context("load config")?;
    cli.view.apply(&mut config);

    // logging is best effort; a read-only home must not block viewing
    let _log_guard = logging::init(&config.log_level).ok();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: config::Config) -> Result<()> {
    let Cli { command, file, .. } = cli;

    // default to the interactive explorer
    let Some(command) = command else {
        return commands::explore::run(file.as_deref(), &config).await;
    };

    match command {
        Commands::Print { file, expand_all } => {
            commands::print::run(file.as_deref(), expand_all, &config)
        }
        Commands::Path { path, file } => commands::path::run(file.as_deref(), &path, &config),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
        },
    }
}
