//! Configuration management for jsonlens.
//!
//! Loads configuration from ${JSONLENS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::expansion::DEFAULT_EXPAND_DEPTH;
use crate::layout::{DEFAULT_INDENT_WIDTH, LayoutOptions};
use crate::model::PreviewNouns;
use crate::value::DEFAULT_MAX_DEPTH;

/// Where clipboard writes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardMode {
    /// OSC 52 escape first, system clipboard as fallback (default)
    #[default]
    Auto,
    /// Terminal OSC 52 escape only
    Osc52,
    /// System clipboard only
    System,
}

impl ClipboardMode {
    pub fn display_name(self) -> &'static str {
        match self {
            ClipboardMode::Auto => "auto",
            ClipboardMode::Osc52 => "osc52",
            ClipboardMode::System => "system",
        }
    }
}

pub mod paths {
    //! Path resolution for jsonlens configuration and log files.
    //!
    //! JSONLENS_HOME resolution order:
    //! 1. JSONLENS_HOME environment variable (if set)
    //! 2. ~/.config/jsonlens
    //! 3. ./.jsonlens when no home directory can be determined

    use std::path::PathBuf;

    pub fn jsonlens_home() -> PathBuf {
        if let Ok(home) = std::env::var("JSONLENS_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".jsonlens"),
            |h| h.join(".config").join("jsonlens"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        jsonlens_home().join("config.toml")
    }

    /// Returns the path to the log file.
    pub fn log_path() -> PathBuf {
        jsonlens_home().join("jsonlens.log")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Columns per nesting level
    pub indent_width: usize,
    /// Nodes shallower than this start expanded
    pub expand_depth: usize,
    /// Delay before the action menu closes after a successful copy
    pub dismiss_after_ms: u64,
    /// Containers nested deeper than this are shown as empty
    pub max_depth: usize,
    pub clipboard: ClipboardMode,
    pub preview: PreviewNouns,
    /// Tracing filter used when JSONLENS_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            expand_depth: DEFAULT_EXPAND_DEPTH,
            dismiss_after_ms: Self::DEFAULT_DISMISS_AFTER_MS,
            max_depth: DEFAULT_MAX_DEPTH,
            clipboard: ClipboardMode::default(),
            preview: PreviewNouns::default(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_DISMISS_AFTER_MS: u64 = 1000;
    pub const DEFAULT_LOG_LEVEL: &'static str = "warn";

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            indent_width: self.indent_width,
            nouns: self.preview.clone(),
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}
