//! CLI module
//!
//! Command-line interface over the library.
//!
//! # Commands
//!
//! - `projects` - List projects of a group or instance
//! - `groups` - List groups of a group or instance
//! - `users` - List users of a group or instance
//! - `collate` - Stream records of the latest NDJSON export
//!
//! Every command prints one JSON document per line on stdout.

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs};
pub use runner::Runner;
