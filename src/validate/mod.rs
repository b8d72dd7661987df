//! Dependency validation for a project's enabled gem set.
//!
//! [`DependencyValidator`] merges every enabled gem's version bounds per
//! target gem and reports two distinct failures:
//! - the target is not enabled at all
//! - the target is enabled at a version outside some dependent's bounds
//!
//! When given a non-zero engine version it also checks each gem's
//! engine compatibility bounds.
//!
//! # Example
//!
//! ```
//! use gemreg::project::ProjectSettings;
//! use gemreg::registry::GemRegistry;
//! use gemreg::validate::DependencyValidator;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let project = temp.path().join("Sandbox");
//! fs::create_dir_all(&project).unwrap();
//! fs::write(project.join("project.json"), r#"{ "project_name": "Sandbox" }"#).unwrap();
//! fs::write(project.join("gems.json"), r#"{ "GemListFormatVersion": 2, "Gems": [] }"#).unwrap();
//!
//! let settings = ProjectSettings::initialize(temp.path(), "Sandbox").unwrap();
//! let registry = GemRegistry::new();
//! let report = DependencyValidator::new(&settings, &registry).validate();
//! assert!(report.is_valid());
//! ```

pub mod report;
pub mod validator;

pub use report::{ValidationError, ValidationErrorKind, ValidationReport};
pub use validator::DependencyValidator;
