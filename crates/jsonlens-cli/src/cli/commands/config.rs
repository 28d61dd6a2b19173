//! Config command handlers.

use jsonlens_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}
