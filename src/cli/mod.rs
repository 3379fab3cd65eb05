use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::index::SymbolCategory;

#[derive(Parser)]
#[command(name = "symnav")]
#[command(author, version, about = "Structural symbol indexing and fuzzy search CLI")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the symbol index and print a summary
    Index {
        /// Workspace root to index (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Search indexed symbols by name
    Search {
        /// Search query, matched fuzzily against symbol names
        query: String,

        /// Symbol kinds to search, comma-separated (default: all)
        #[arg(short, long, value_delimiter = ',')]
        kinds: Vec<SymbolCategory>,

        /// Workspace root to search (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}
