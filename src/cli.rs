use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "rank raters by how well they predict your own ratings")]
pub struct Cli {
    /// Folder holding the roster and the new/current/discarded exports
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Rank every rater in the current exports against your ratings
    Rank {
        /// Your ratings as an Artist,Album,Score CSV
        #[arg(short, long)]
        reference: Option<PathBuf>,
        /// JSON object of item -> divisor replacing the built-in overrides
        #[arg(short, long)]
        overrides: Option<PathBuf>,
        /// Evaluate candidates of a round in parallel
        #[arg(long)]
        parallel: bool,
        /// Also write the ranking as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// List items by how many raters rated them, least covered first
        #[arg(long)]
        items: bool,
    },
    /// Move freshly downloaded exports into the current set
    Sync,
    /// Compare the friends list with the current exports
    Roster,
    /// List items only you or only the raters have rated
    Diff {
        /// Your ratings as an Artist,Album,Score CSV
        #[arg(short, long)]
        reference: Option<PathBuf>,
        /// Write my_items.csv and their_items.csv into this folder
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}
