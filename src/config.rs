use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".symnav.toml";

/// Per-workspace settings, loaded from `<root>/.symnav.toml` when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Ignore-file names read from the workspace root, gitignore syntax.
    #[serde(default = "default_ignore_file_names")]
    pub ignore_file_names: Vec<String>,

    /// Literal ignore patterns applied after the ignore files.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Optional glob that narrows discovery further.
    #[serde(default)]
    pub exclude: Option<String>,

    /// Whether hosts should refresh a file's catalog on save events.
    #[serde(default = "default_update_index_on_save")]
    pub update_index_on_save: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            ignore_file_names: default_ignore_file_names(),
            ignore_patterns: Vec::new(),
            exclude: None,
            update_index_on_save: default_update_index_on_save(),
            logging: LoggingConfig::default(),
        }
    }
}

impl WorkspaceSettings {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn default_ignore_file_names() -> Vec<String> {
    vec![".gitignore".to_string()]
}

fn default_update_index_on_save() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level for this crate's targets: trace|debug|info|warn|error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// When set, also write daily-rotated log files into this directory
    /// (relative paths resolve against the workspace root).
    #[serde(default)]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_log_file_prefix(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_prefix() -> String {
    "symnav.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_no_config_file() {
        let dir = tempdir().unwrap();
        let settings = WorkspaceSettings::load(dir.path()).unwrap();

        assert_eq!(settings.ignore_file_names, vec![".gitignore".to_string()]);
        assert!(settings.ignore_patterns.is_empty());
        assert!(settings.exclude.is_none());
        assert!(settings.update_index_on_save);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "ignore_patterns = [\"vendor/\"]\nexclude = \"tests/**\"\n",
        )
        .unwrap();

        let settings = WorkspaceSettings::load(dir.path()).unwrap();
        assert_eq!(settings.ignore_patterns, vec!["vendor/".to_string()]);
        assert_eq!(settings.exclude.as_deref(), Some("tests/**"));
        assert_eq!(settings.ignore_file_names, vec![".gitignore".to_string()]);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "ignore_patterns = 10\n").unwrap();

        assert!(WorkspaceSettings::load(dir.path()).is_err());
    }
}
