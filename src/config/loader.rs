//! Configuration file discovery and loading.

use crate::config::schema::ToolConfig;
use crate::error::{GemError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory holding the tool's configuration.
pub const CONFIG_DIR: &str = ".gemreg";
/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";
/// File marking an engine checkout.
pub const ENGINE_MARKER: &str = "engine.json";

/// Path of the config file for an application root.
pub fn config_path(app_root: &Path) -> PathBuf {
    app_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Find the application root by walking up from `start`.
///
/// Looks for:
/// 1. `.gemreg` directory (primary indicator)
/// 2. `engine.json` file (fallback)
///
/// # Returns
///
/// The path to the application root, or None if not found.
pub fn find_app_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(ENGINE_MARKER).is_file() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into ToolConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ToolConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GemError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GemError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into ToolConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ToolConfig> {
    if content.trim().is_empty() {
        return Ok(ToolConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| GemError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config for an application root with environment overrides.
///
/// A missing config file is not an error; defaults are used.
pub fn load_config(app_root: &Path) -> Result<ToolConfig> {
    let path = config_path(app_root);
    let mut config = match load_config_file(&path) {
        Ok(config) => config,
        Err(GemError::ConfigNotFound { .. }) => {
            debug!("No config at {}, using defaults", path.display());
            ToolConfig::default()
        }
        Err(e) => return Err(e),
    };
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}
