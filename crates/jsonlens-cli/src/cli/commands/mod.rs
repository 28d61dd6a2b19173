//! CLI command handlers.

pub mod config;
pub mod explore;
pub mod path;
pub mod print;
