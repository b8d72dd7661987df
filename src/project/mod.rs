//! Project gem enablement.
//!
//! A project folder holds two JSON files:
//! - `project.json` with the project name
//! - `gems.json`, the ledger of enabled gem versions
//!
//! [`ProjectSettings`] loads both, tracks enable/disable calls, and writes
//! the ledger back.
//!
//! # Example
//!
//! ```
//! use gemreg::gem::GemId;
//! use gemreg::project::{ProjectGemSpecifier, ProjectSettings};
//! use gemreg::version::Version;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let project = temp.path().join("Sandbox");
//! fs::create_dir_all(&project).unwrap();
//! fs::write(project.join("project.json"), r#"{ "project_name": "Sandbox" }"#).unwrap();
//! fs::write(project.join("gems.json"), r#"{ "GemListFormatVersion": 2, "Gems": [] }"#).unwrap();
//!
//! let mut settings = ProjectSettings::initialize(temp.path(), "Sandbox").unwrap();
//! let id = GemId::parse("e5f049ad7f534847a89c27b7339cf6a6").unwrap();
//! settings.enable_gem(ProjectGemSpecifier::new(id, Version::new(1, 0, 0), "Gems/Camera"));
//! assert!(settings.is_gem_enabled(id, &[">=1.0.0"]).unwrap());
//! settings.save(None).unwrap();
//! ```

pub mod ledger;
pub mod settings;

pub use ledger::{
    GemsLedger, LedgerEntry, ProjectDescriptor, GEMS_LEDGER_FILENAME, GEM_LIST_FORMAT_VERSION,
    PROJECT_FILENAME,
};
pub use settings::{ProjectGemSpecifier, ProjectGemSpecifierMap, ProjectSettings};
