//! gemreg - Gem discovery, project enablement, and dependency validation.
//!
//! Gems are versioned plugin packages described by a `gem.json` file. A
//! project enables a set of gem versions in its `gems.json` ledger; gemreg
//! finds gem descriptions on disk, tracks what a project enables, and checks
//! that every enabled gem's dependencies are met.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Tool configuration loading
//! - [`error`] - Error types and result aliases
//! - [`gem`] - Gem descriptions, ids, modules, and schema upgrades
//! - [`project`] - Project settings and the enabled-gem ledger
//! - [`registry`] - Search paths, scanning, and the gem catalog
//! - [`ui`] - Terminal output
//! - [`validate`] - Dependency validation
//! - [`version`] - Versions, bounds, and dependencies
//!
//! # Example
//!
//! ```
//! use gemreg::gem::GemId;
//! use gemreg::version::{Dependency, Specifier, Version};
//!
//! let id = GemId::parse("e5f049ad7f534847a89c27b7339cf6a6").unwrap();
//! let mut dependency = Dependency::new(id);
//! dependency.parse_versions(&[">=1.0.0", "~>1.2"]).unwrap();
//!
//! assert!(dependency.is_fulfilled_by(&Specifier::new(id, Version::new(1, 4, 0))));
//! assert!(!dependency.is_fulfilled_by(&Specifier::new(id, Version::new(2, 0, 0))));
//! ```
//!
//! For file-based loading, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod gem;
pub mod project;
pub mod registry;
pub mod ui;
pub mod validate;
pub mod version;

pub use error::{GemError, Result};
