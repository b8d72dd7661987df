//! Configuration schema for `.gemreg/config.yml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::registry::SearchPath;
use crate::version::Version;

/// Overrides the engine root.
pub const ENV_ENGINE_ROOT: &str = "GEMREG_ENGINE_ROOT";
/// Overrides the engine version used for compatibility checks.
pub const ENV_ENGINE_VERSION: &str = "GEMREG_ENGINE_VERSION";
/// Overrides the project subfolder.
pub const ENV_PROJECT: &str = "GEMREG_PROJECT";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Engine install directory. Defaults to the application root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_root: Option<PathBuf>,

    /// Host engine version. Engine checks are skipped when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<Version>,

    /// Project subfolder under the application root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Extra gem search roots, scanned before the default ones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<SearchPathConfig>,
}

/// One configured search root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPathConfig {
    pub path: PathBuf,

    /// Subdirectory to restrict scanning to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ToolConfig {
    /// Replace file values with environment overrides.
    ///
    /// `lookup` is usually `std::env::var(..).ok()`; tests pass a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_ENGINE_ROOT).filter(|v| !v.is_empty()) {
            self.engine_root = Some(PathBuf::from(root));
        }
        if let Some(version) = lookup(ENV_ENGINE_VERSION).filter(|v| !v.is_empty()) {
            self.engine_version = Some(Version::parse(&version)?);
        }
        if let Some(project) = lookup(ENV_PROJECT).filter(|v| !v.is_empty()) {
            self.project = Some(project);
        }
        Ok(())
    }

    /// Engine root, resolved against `app_root` when relative.
    pub fn engine_root(&self, app_root: &Path) -> PathBuf {
        match &self.engine_root {
            Some(root) => resolve(app_root, root),
            None => app_root.to_path_buf(),
        }
    }

    /// Engine version, or zero when unset.
    pub fn engine_version(&self) -> Version {
        self.engine_version.unwrap_or(Version::ZERO)
    }

    /// Ordered, de-duplicated gem search roots.
    ///
    /// Configured entries come first, then `<engine_root>/Gems`, then
    /// `<app_root>/Gems`.
    pub fn search_paths(&self, app_root: &Path) -> Vec<SearchPath> {
        let mut paths: Vec<SearchPath> = self
            .search_paths
            .iter()
            .map(|entry| {
                let root = resolve(app_root, &entry.path);
                match &entry.filter {
                    Some(filter) => SearchPath::with_filter(root, filter.as_str()),
                    None => SearchPath::new(root),
                }
            })
            .collect();

        for default in [
            SearchPath::new(self.engine_root(app_root).join("Gems")),
            SearchPath::new(app_root.join("Gems")),
        ] {
            if !paths.contains(&default) {
                paths.push(default);
            }
        }
        paths
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
