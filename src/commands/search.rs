use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::config::WorkspaceSettings;
use crate::index::{SymbolCategory, WorkspaceIndex, WorkspaceRoot};

/// Run the search command.
///
/// Builds the index for the workspace root, then runs the two-stage fuzzy
/// search and prints the ranked results.
///
/// # Arguments
///
/// * `query` - The search query
/// * `kinds` - Symbol kinds to search; empty means all
/// * `path` - Workspace root; defaults to the current directory
pub async fn run(query: &str, kinds: &[SymbolCategory], path: Option<PathBuf>) -> Result<()> {
    let root_path = match path {
        Some(path) => path,
        None => env::current_dir()?,
    };
    let settings = WorkspaceSettings::load(&root_path).unwrap_or_default();

    let root = WorkspaceRoot::new(root_path);
    let index = WorkspaceIndex::new(vec![root], settings);

    let categories = if kinds.is_empty() {
        SymbolCategory::all().to_vec()
    } else {
        kinds.to_vec()
    };

    // search() builds the index on first use.
    let results = index.search(query, &categories).await;

    if results.is_empty() {
        println!("No symbols found for: {}", query);
        return Ok(());
    }

    println!("Found {} symbols for: \"{}\"\n", results.len(), query);

    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. {} [{}]",
            i + 1,
            result.symbol.definition,
            result.symbol.kind.as_str()
        );
        println!(
            "   {} (bytes {}..{})",
            result.location(),
            result.symbol.start_byte,
            result.symbol.end_byte
        );
        println!();
    }

    Ok(())
}
