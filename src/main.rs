use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use symnav::cli::{Cli, Commands};
use symnav::config::WorkspaceSettings;
use symnav::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let workspace_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let settings = WorkspaceSettings::load(&workspace_root).unwrap_or_default();

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&settings.logging, &workspace_root)?;

    tracing::debug!("symnav starting in {}", workspace_root.display());

    let cli = Cli::parse();

    match cli.command {
        Commands::Index { path } => {
            symnav::commands::index::run(path).await?;
        }
        Commands::Search { query, kinds, path } => {
            symnav::commands::search::run(&query, &kinds, path).await?;
        }
    }

    Ok(())
}
