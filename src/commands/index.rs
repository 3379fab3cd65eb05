//! Index command implementation.
//!
//! Builds the full workspace symbol index once and prints a summary.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::PathBuf;

use crate::config::WorkspaceSettings;
use crate::index::{WorkspaceIndex, WorkspaceRoot};

/// Run the index command.
///
/// # Arguments
///
/// * `path` - Workspace root; defaults to the current directory
pub async fn run(path: Option<PathBuf>) -> Result<()> {
    let root_path = match path {
        Some(path) => path,
        None => env::current_dir()?,
    };
    let settings = WorkspaceSettings::load(&root_path).unwrap_or_default();

    let root = WorkspaceRoot::new(root_path.clone());
    println!("Indexing workspace: {}", root_path.display());

    let index = WorkspaceIndex::new(vec![root], settings);

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let stats = index
        .rebuild_index_with_progress(|processed, total| {
            bar.set_length(total as u64);
            bar.set_position(processed as u64);
        })
        .await?;
    bar.finish_and_clear();

    println!(
        "Indexed {} of {} files ({} skipped)",
        stats.indexed, stats.total, stats.skipped
    );

    Ok(())
}
