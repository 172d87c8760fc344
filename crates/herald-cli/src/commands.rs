//! CLI commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Herald - broadcast bus tooling
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to herald.jsonc/.json/.yml/.yaml lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every event name in the catalog
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Broadcast a JSONL event log through a fresh bus and report the
    /// resulting state
    Replay {
        /// Event log, one `{"type": ..., "detail": ...}` object per line;
        /// `-` reads stdin
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved configuration
    Config {
        /// Only print the path of the file that was loaded
        #[arg(long)]
        path: bool,
    },
}
