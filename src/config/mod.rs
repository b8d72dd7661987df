//! Tool configuration for gemreg.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use gemreg::config::{load_config, CONFIG_DIR};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(CONFIG_DIR);
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(config_dir.join("config.yml"), "project: Sandbox").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! assert!(config.project.is_some());
//! ```
//!
//! # Environment
//!
//! `GEMREG_ENGINE_ROOT`, `GEMREG_ENGINE_VERSION` and `GEMREG_PROJECT`
//! replace the matching file values.

pub mod loader;
pub mod schema;

// Schema re-exports
pub use schema::{
    SearchPathConfig, ToolConfig, ENV_ENGINE_ROOT, ENV_ENGINE_VERSION, ENV_PROJECT,
};

// Loader re-exports
pub use loader::{
    config_path, find_app_root, load_config, load_config_file, parse_config, CONFIG_DIR,
    CONFIG_FILE, ENGINE_MARKER,
};
