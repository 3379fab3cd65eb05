//! The workspace-wide symbol index.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::config::WorkspaceSettings;
use crate::error::IndexError;
use crate::parser::LanguageRegistry;

use super::{FileCatalog, IgnoreFilter, SearchResult, SymbolCategory, WorkspaceRoot};

/// Stage-one file ranking keeps at most this many files per query.
const MAX_MATCHED_FILES: usize = 30;

/// Outcome of one full rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildStats {
    pub indexed: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Maps file identity to its parsed catalog, with full rebuild, incremental
/// add/update/remove and two-stage fuzzy search.
///
/// The map is replaced wholesale at the end of a rebuild (built off to the
/// side, swapped in under a brief write lock), so a reader always sees either
/// the old or the fully-populated new map. The `is_indexing` flag only
/// rejects overlapping rebuilds; an incremental update racing a rebuild is an
/// accepted narrow window.
pub struct WorkspaceIndex {
    roots: Vec<Arc<WorkspaceRoot>>,
    settings: WorkspaceSettings,
    registry: LanguageRegistry,
    files: RwLock<HashMap<PathBuf, Arc<FileCatalog>>>,
    has_index: AtomicBool,
    is_indexing: AtomicBool,
}

impl WorkspaceIndex {
    pub fn new(roots: Vec<WorkspaceRoot>, settings: WorkspaceSettings) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
            settings,
            registry: LanguageRegistry::new(),
            files: RwLock::new(HashMap::new()),
            has_index: AtomicBool::new(false),
            is_indexing: AtomicBool::new(false),
        }
    }

    pub fn has_index(&self) -> bool {
        self.has_index.load(Ordering::SeqCst)
    }

    pub fn file_count(&self) -> usize {
        self.files.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Catalog snapshot for one file, if indexed.
    pub fn catalog(&self, path: &Path) -> Option<Arc<FileCatalog>> {
        self.files
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    /// Full rebuild with progress logged at debug level.
    pub async fn rebuild_index(&self) -> Result<RebuildStats, IndexError> {
        self.rebuild_index_with_progress(|processed, total| {
            debug!(processed, total, "indexing progress");
        })
        .await
    }

    /// Full rebuild, reporting (processed, total) after each file.
    ///
    /// A rebuild already in progress rejects this one; it is never queued.
    /// Per-file failures are logged and skipped, never aborting the rebuild.
    pub async fn rebuild_index_with_progress<F>(
        &self,
        mut progress: F,
    ) -> Result<RebuildStats, IndexError>
    where
        F: FnMut(usize, usize),
    {
        if self
            .is_indexing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("rebuild requested while another rebuild is running, ignoring");
            return Err(IndexError::RebuildInProgress);
        }

        let result = self.rebuild_inner(&mut progress).await;
        self.is_indexing.store(false, Ordering::SeqCst);
        result
    }

    async fn rebuild_inner<F>(&self, progress: &mut F) -> Result<RebuildStats, IndexError>
    where
        F: FnMut(usize, usize),
    {
        if self.roots.is_empty() {
            warn!("rebuild requested with no workspace root configured");
            return Err(IndexError::NoWorkspaceAvailable);
        }

        let extensions = self.registry.extensions();
        let mut discovered: Vec<(Arc<WorkspaceRoot>, PathBuf)> = Vec::new();
        for root in &self.roots {
            let filter = IgnoreFilter::new(&root.path, &self.settings, &extensions);
            for path in filter.discover() {
                discovered.push((Arc::clone(root), path));
            }
        }
        discovered.sort_by(|a, b| a.1.cmp(&b.1));

        let total = discovered.len();
        let mut stats = RebuildStats {
            total,
            ..Default::default()
        };
        // Built off to the side; readers keep seeing the old map until the
        // swap below.
        let mut new_files: HashMap<PathBuf, Arc<FileCatalog>> = HashMap::with_capacity(total);

        for (processed, (root, path)) in discovered.into_iter().enumerate() {
            match self.parse_one(root, path.clone()).await {
                Ok(catalog) => {
                    new_files.insert(path, Arc::new(catalog));
                    stats.indexed += 1;
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping file");
                    stats.skipped += 1;
                }
            }
            progress(processed + 1, total);
        }

        *self.files.write().unwrap_or_else(|e| e.into_inner()) = new_files;
        self.has_index.store(true, Ordering::SeqCst);

        info!(
            indexed = stats.indexed,
            skipped = stats.skipped,
            "workspace index rebuilt"
        );
        Ok(stats)
    }

    async fn parse_one(
        &self,
        root: Arc<WorkspaceRoot>,
        path: PathBuf,
    ) -> Result<FileCatalog, IndexError> {
        let mut catalog = FileCatalog::new(root, path, &self.registry)?;
        catalog.parse().await?;
        Ok(catalog)
    }

    /// The root owning `path`, longest match first.
    fn root_for(&self, path: &Path) -> Option<Arc<WorkspaceRoot>> {
        self.roots
            .iter()
            .filter(|root| path.starts_with(&root.path))
            .max_by_key(|root| root.path.as_os_str().len())
            .cloned()
    }

    /// Parse one file and replace its entry. Used for save/create events.
    pub async fn add_or_update_file(&self, path: &Path) -> Result<(), IndexError> {
        let root = self
            .root_for(path)
            .ok_or(IndexError::NoWorkspaceAvailable)?;
        let catalog = self.parse_one(root, path.to_path_buf()).await?;
        self.files
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_path_buf(), Arc::new(catalog));
        Ok(())
    }

    /// Bulk variant; per-file failures are logged and do not stop the rest.
    pub async fn add_or_update_files(&self, paths: &[PathBuf]) {
        for path in paths {
            if let Err(error) = self.add_or_update_file(path).await {
                warn!(path = %path.display(), %error, "skipping file update");
            }
        }
    }

    /// Drop one file's entry. Used for delete events; a rename is modeled as
    /// remove(old) followed by add_or_update(new), not atomically.
    pub fn remove_file(&self, path: &Path) {
        self.files
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path);
    }

    pub fn remove_files(&self, paths: &[PathBuf]) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        for path in paths {
            files.remove(path);
        }
    }

    /// Two-stage fuzzy search.
    ///
    /// Stage 1 ranks files by scoring the query against each file's
    /// concatenated symbol names (scoped to `categories`), keeping the top
    /// [`MAX_MATCHED_FILES`]. Stage 2 re-runs each ranked file's own search
    /// and concatenates results in file-rank order, preserving every file's
    /// internal similarity order.
    pub async fn search(&self, query: &str, categories: &[SymbolCategory]) -> Vec<SearchResult> {
        if !self.has_index() {
            // First search builds the index implicitly.
            if let Err(error) = self.rebuild_index().await {
                warn!(%error, "implicit index rebuild failed");
            }
        }

        let snapshot: Vec<Arc<FileCatalog>> = {
            let files = self.files.read().unwrap_or_else(|e| e.into_inner());
            files.values().cloned().collect()
        };

        let mut ranked: Vec<(u32, Arc<FileCatalog>)> = snapshot
            .into_iter()
            .filter_map(|catalog| {
                let names = catalog.joined_symbol_names(categories);
                super::fuzzy::score(query, &names).map(|score| (score, catalog))
            })
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.path().cmp(b.1.path())));
        ranked.truncate(MAX_MATCHED_FILES);

        let mut results = Vec::new();
        for (_, catalog) in &ranked {
            results.extend(catalog.search(query, categories));
        }
        results
    }
}
