//! File discovery with combined ignore rules.
//!
//! Per workspace root: patterns from the configured ignore files (when
//! present) followed by configured literal patterns, one matcher. With
//! gitignore semantics the later-added pattern wins on a conflicting path.
//! Discovery keeps regular files whose extension has a registered adapter,
//! minus anything the exclude glob or the ignore rules match.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use tracing::warn;

use crate::config::WorkspaceSettings;

pub struct IgnoreFilter {
    root: PathBuf,
    matcher: Gitignore,
    extensions: HashSet<String>,
    exclude: Option<glob::Pattern>,
}

impl IgnoreFilter {
    pub fn new(root: &Path, settings: &WorkspaceSettings, extensions: &[&str]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for file_name in &settings.ignore_file_names {
            let ignore_file = root.join(file_name);
            if ignore_file.is_file() {
                if let Some(error) = builder.add(&ignore_file) {
                    warn!(path = %ignore_file.display(), %error, "skipping unreadable ignore file");
                }
            }
        }
        for pattern in &settings.ignore_patterns {
            if let Err(error) = builder.add_line(None, pattern) {
                warn!(pattern, %error, "skipping invalid ignore pattern");
            }
        }

        let matcher = builder.build().unwrap_or_else(|error| {
            warn!(%error, "failed to build ignore rules, ignoring nothing");
            Gitignore::empty()
        });

        let exclude = settings.exclude.as_deref().and_then(|pattern| {
            glob::Pattern::new(pattern)
                .map_err(|error| {
                    warn!(pattern, %error, "skipping invalid exclude glob");
                })
                .ok()
        });

        Self {
            root: root.to_path_buf(),
            matcher,
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
            exclude,
        }
    }

    /// Whether the combined rules exclude this path (checked relative to the
    /// workspace root).
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if let Some(exclude) = &self.exclude {
            if exclude.matches_path(relative) {
                return true;
            }
        }
        self.matcher
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }

    /// Walk the root and return every indexable file.
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);
        // The configured ignore files are our own concern; disable the
        // walker's built-in git handling so rules apply exactly once.
        builder.standard_filters(false);
        builder.hidden(true);

        builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(OsStr::to_str)
                    .map(|ext| self.extensions.contains(ext))
                    .unwrap_or(false)
            })
            .filter(|path| !self.is_ignored(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const EXTENSIONS: &[&str] = &["js", "py"];

    fn settings() -> WorkspaceSettings {
        WorkspaceSettings::default()
    }

    #[test]
    fn discovers_only_registered_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app.js"), "const a = 1;\n").unwrap();
        fs::write(dir.path().join("tool.py"), "a = 1\n").unwrap();
        fs::write(dir.path().join("readme.md"), "# readme\n").unwrap();

        let filter = IgnoreFilter::new(dir.path(), &settings(), EXTENSIONS);
        let files = filter.discover();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn gitignore_file_patterns_apply() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join(".gitignore"), "dist/\n").unwrap();
        fs::write(dir.path().join("app.js"), "const a = 1;\n").unwrap();
        fs::write(dir.path().join("dist/bundle.js"), "const b = 2;\n").unwrap();

        let filter = IgnoreFilter::new(dir.path(), &settings(), EXTENSIONS);
        let files = filter.discover();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn literal_patterns_apply() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("generated")).unwrap();
        fs::write(dir.path().join("app.js"), "const a = 1;\n").unwrap();
        fs::write(dir.path().join("generated/out.js"), "const b = 2;\n").unwrap();

        let mut settings = settings();
        settings.ignore_patterns = vec!["generated/".to_string()];

        let filter = IgnoreFilter::new(dir.path(), &settings, EXTENSIONS);
        let files = filter.discover();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn later_pattern_wins_on_conflict() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "app.js\n").unwrap();
        fs::write(dir.path().join("app.js"), "const a = 1;\n").unwrap();

        // The literal un-ignore is added after the ignore file, so it wins.
        let mut settings = settings();
        settings.ignore_patterns = vec!["!app.js".to_string()];

        let filter = IgnoreFilter::new(dir.path(), &settings, EXTENSIONS);
        let files = filter.discover();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn exclude_glob_narrows_discovery() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tests")).unwrap();
        fs::write(dir.path().join("app.js"), "const a = 1;\n").unwrap();
        fs::write(dir.path().join("tests/app_test.js"), "const b = 2;\n").unwrap();

        let mut settings = settings();
        settings.exclude = Some("tests/*".to_string());

        let filter = IgnoreFilter::new(dir.path(), &settings, EXTENSIONS);
        let files = filter.discover();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn hidden_files_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.js"), "const a = 1;\n").unwrap();
        fs::write(dir.path().join("app.js"), "const a = 1;\n").unwrap();

        let filter = IgnoreFilter::new(dir.path(), &settings(), EXTENSIONS);
        let files = filter.discover();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }
}
