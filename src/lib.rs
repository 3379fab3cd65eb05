pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod parser;

pub use config::WorkspaceSettings;
pub use error::IndexError;
pub use index::{SearchResult, SymbolCategory, WorkspaceIndex, WorkspaceRoot};
