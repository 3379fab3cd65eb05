//! Per-file symbol catalog.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::IndexError;
use crate::parser::{engine, LanguageCapabilities, LanguageRegistry, SymbolCatalogs, SymbolRecord};

use super::{fuzzy, SearchResult, SymbolCategory, WorkspaceRoot};

/// One file's parsed symbol catalogs plus its identity.
///
/// Created when a file is (re)parsed; the catalogs are replaced wholesale on
/// every parse, never merged.
pub struct FileCatalog {
    root: Arc<WorkspaceRoot>,
    path: PathBuf,
    caps: Arc<dyn LanguageCapabilities>,
    catalogs: SymbolCatalogs,
}

impl FileCatalog {
    /// Resolve the capability adapter for the file's extension.
    /// Fails fast with `UnsupportedLanguage` when none is registered.
    pub fn new(
        root: Arc<WorkspaceRoot>,
        path: PathBuf,
        registry: &LanguageRegistry,
    ) -> Result<Self, IndexError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let caps = registry
            .get(&extension)
            .ok_or(IndexError::UnsupportedLanguage(extension))?;

        Ok(Self {
            root,
            path,
            caps,
            catalogs: SymbolCatalogs::default(),
        })
    }

    /// Read the file and rebuild all four catalogs from scratch.
    pub async fn parse(&mut self) -> Result<(), IndexError> {
        let source = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| IndexError::FileRead {
                path: self.path.clone(),
                source,
            })?;

        self.catalogs = engine::extract(self.caps.as_ref(), &source)?;
        Ok(())
    }

    pub fn root(&self) -> &Arc<WorkspaceRoot> {
        &self.root
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalogs(&self) -> &SymbolCatalogs {
        &self.catalogs
    }

    fn catalog_for(&self, category: SymbolCategory) -> &BTreeMap<String, SymbolRecord> {
        match category {
            SymbolCategory::Classes => &self.catalogs.classes,
            SymbolCategory::Functions => &self.catalogs.functions,
            SymbolCategory::Methods => &self.catalogs.methods,
            SymbolCategory::Variables => &self.catalogs.variables,
        }
    }

    /// All dotted symbol names in the requested catalogs, space-joined.
    /// Used by the workspace index to rank files before ranking symbols.
    pub fn joined_symbol_names(&self, categories: &[SymbolCategory]) -> String {
        let mut names = Vec::new();
        for category in categories {
            names.extend(self.catalog_for(*category).keys().map(String::as_str));
        }
        names.join(" ")
    }

    /// Fuzzy-search the requested catalogs, best matches first. No cap here;
    /// the workspace stage limits how many files contribute results.
    pub fn search(&self, query: &str, categories: &[SymbolCategory]) -> Vec<SearchResult> {
        let mut scored: Vec<(u32, &SymbolRecord)> = Vec::new();
        for category in categories {
            for record in self.catalog_for(*category).values() {
                if let Some(score) = fuzzy::score(query, &record.name) {
                    scored.push((score, record));
                }
            }
        }
        scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(&b.1.name)));

        scored
            .into_iter()
            .map(|(score, record)| SearchResult {
                root: Arc::clone(&self.root),
                path: self.path.clone(),
                symbol: record.clone(),
                score,
            })
            .collect()
    }
}
