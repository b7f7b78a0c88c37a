//! Project configuration for minionsuite runs
//!
//! A project can keep its scaffolding defaults in a `minionsuite.toml` next to
//! where the tool is run, so repeated invocations only pass the model path:
//!
//! ```toml
//! namespace = "Blog.Services"
//! output = "Services"
//! db_context = "BlogContext"
//! page_size = 25
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generator::GeneratorOptions;

/// File name looked up in the working directory when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "minionsuite.toml";

/// Defaults loaded from `minionsuite.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Namespace of the generated classes
    #[serde(default)]
    pub namespace: Option<String>,

    /// Output folder, relative to the working directory
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Database context class used by services and service tests
    #[serde(default)]
    pub db_context: Option<String>,

    /// `PAGE_SIZE` of generated controllers
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl ProjectConfig {
    /// Write every value this file sets into `options`
    pub fn apply_to(&self, options: &mut GeneratorOptions) {
        if let Some(namespace) = &self.namespace {
            options.namespace = Some(namespace.clone());
        }
        if let Some(output) = &self.output {
            options.output = output.clone();
        }
        if let Some(db_context) = &self.db_context {
            options.db_context = db_context.clone();
        }
        if let Some(page_size) = self.page_size {
            options.page_size = page_size;
        }
    }
}

/// Load project configuration from a TOML file
///
/// # Returns
///
/// Returns `Ok(Some(config))` if file exists and parses successfully,
/// `Ok(None)` if file doesn't exist (not an error),
/// `Err` if file exists but fails to parse or holds invalid values.
pub fn load_project_config(config_path: &Path) -> anyhow::Result<Option<ProjectConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

    let config: ProjectConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse project config: {}", config_path.display()))?;

    if config.page_size == Some(0) {
        bail!(
            "Invalid project config {}: page_size must be at least 1",
            config_path.display()
        );
    }

    Ok(Some(config))
}

/// Auto-detect `minionsuite.toml` in `dir`
pub fn auto_detect_config_path(dir: &Path) -> Option<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve and load the project configuration
///
/// Priority:
/// 1. Explicitly provided path (via CLI); it must exist
/// 2. Auto-detected in `dir`
/// 3. None (no config)
pub fn resolve_project_config(
    explicit_path: Option<&Path>,
    dir: &Path,
) -> anyhow::Result<Option<ProjectConfig>> {
    match explicit_path {
        Some(path) => {
            if !path.exists() {
                bail!("Project config not found: {}", path.display());
            }
            load_project_config(path)
        }
        None => match auto_detect_config_path(dir) {
            Some(path) => load_project_config(&path),
            None => Ok(None),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_project_config(&dir.path().join(CONFIG_FILE_NAME))
            .unwrap()
            .is_none());
        assert!(resolve_project_config(None, dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_and_apply() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "namespace = \"Blog.Services\"\ndb_context = \"BlogContext\"\npage_size = 25\n",
        )
        .unwrap();

        let config = resolve_project_config(None, dir.path()).unwrap().unwrap();
        assert_eq!(config.namespace.as_deref(), Some("Blog.Services"));
        assert_eq!(config.output, None);

        let mut options = GeneratorOptions::default();
        config.apply_to(&mut options);
        assert_eq!(options.namespace.as_deref(), Some("Blog.Services"));
        assert_eq!(options.db_context, "BlogContext");
        assert_eq!(options.page_size, 25);
        assert_eq!(options.output, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_files_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");

        fs::write(&path, "page_size = 0\n").unwrap();
        let err = load_project_config(&path).unwrap_err();
        assert!(err.to_string().contains("page_size"));

        fs::write(&path, "namespce = \"Typo\"\n").unwrap();
        assert!(load_project_config(&path).is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(resolve_project_config(Some(&missing), dir.path()).is_err());
    }
}
