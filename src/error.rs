//! Error types for indexing and parsing.
//!
//! All parse-time errors are file-scoped: a rebuild catches them per file,
//! logs, and moves on. The rebuilt index simply omits files that failed.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// No capability adapter is registered for the file extension.
    #[error("unsupported language for extension '{0}'")]
    UnsupportedLanguage(String),

    /// Reading the file from disk failed.
    #[error("failed to read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree-sitter grammar could not be loaded into a parser.
    #[error("failed to load grammar for {language}")]
    Grammar {
        language: &'static str,
        #[source]
        source: tree_sitter::LanguageError,
    },

    /// A full rebuild was requested while another one is running.
    /// Overlapping rebuilds are rejected, never queued or interleaved.
    #[error("index rebuild already in progress")]
    RebuildInProgress,

    /// An index operation was requested with no workspace root configured.
    #[error("no workspace root available")]
    NoWorkspaceAvailable,
}
