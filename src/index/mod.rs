//! Workspace-level symbol indexing and two-stage fuzzy search.
//!
//! A [`WorkspaceIndex`] owns one [`FileCatalog`] per parsed file and answers
//! queries by ranking files first, then re-ranking symbols within the top
//! files.

pub mod file;
pub mod fuzzy;
pub mod ignore;
pub mod workspace;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;

use crate::parser::SymbolRecord;

pub use file::FileCatalog;
pub use ignore::IgnoreFilter;
pub use workspace::{RebuildStats, WorkspaceIndex};

/// One workspace root with a display name used in location strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceRoot {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    pub fn with_name(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }
}

/// Which per-file catalogs a search should consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SymbolCategory {
    Classes,
    Functions,
    Methods,
    Variables,
}

impl SymbolCategory {
    pub fn all() -> [SymbolCategory; 4] {
        [
            SymbolCategory::Classes,
            SymbolCategory::Functions,
            SymbolCategory::Methods,
            SymbolCategory::Variables,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolCategory::Classes => "classes",
            SymbolCategory::Functions => "functions",
            SymbolCategory::Methods => "methods",
            SymbolCategory::Variables => "variables",
        }
    }
}

/// A single search hit: file identity plus the matched symbol.
///
/// Transient projection; never stored in the index. `score` is the fuzzy
/// match score of the symbol name (lower = better).
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub root: Arc<WorkspaceRoot>,
    pub path: PathBuf,
    pub symbol: SymbolRecord,
    pub score: u32,
}

impl SearchResult {
    /// Human-readable location: workspace name plus root-relative path.
    pub fn location(&self) -> String {
        format!("{}: {}", self.root.name, self.relative_path().display())
    }

    pub fn relative_path(&self) -> &Path {
        self.path.strip_prefix(&self.root.path).unwrap_or(&self.path)
    }
}
