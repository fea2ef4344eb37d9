//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Paginated GitLab listings and NDJSON collation
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects of a group (including subgroups) or of the whole instance
    Projects {
        #[command(flatten)]
        list: ListArgs,

        /// Only archived (true) or only active (false) projects
        #[arg(long)]
        archived: Option<bool>,
    },

    /// List subgroups of a group, or all groups of the instance
    Groups {
        #[command(flatten)]
        list: ListArgs,
    },

    /// List members of a group, or all users of a self-managed instance
    Users {
        #[command(flatten)]
        list: ListArgs,

        /// Only active (true) or only inactive (false) users
        #[arg(long)]
        active: Option<bool>,
    },

    /// Stream records from the latest NDJSON file matching a pattern
    Collate {
        /// Glob-like URL, e.g. s3://bucket/exports/search-*.ndjson
        #[arg(short, long)]
        pattern: String,

        /// Document type, used for logging
        #[arg(short = 't', long = "type", default_value = "documents")]
        document_type: String,

        /// Stop after this many records
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Arguments shared by the listing commands
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Group or instance URL, e.g. https://gitlab.com/groups/my-team
    #[arg(short, long)]
    pub target: String,

    /// Free-text search filter
    #[arg(long)]
    pub search: Option<String>,

    /// Stop after this many items
    #[arg(long)]
    pub limit: Option<usize>,
}
