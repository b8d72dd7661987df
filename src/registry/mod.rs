//! Gem registry for discovering gem descriptions on disk.
//!
//! This module handles finding and holding every known gem:
//! - Search roots in [`search`]
//! - Recursive description-file discovery in [`scan`]
//! - The id/version catalog in [`catalog`]
//!
//! # Discovery
//!
//! Each search root is walked recursively. Any file named `gem.json`
//! (case-insensitive) is parsed; walking continues below it so nested gems
//! are found too. Gems enabled by a project can also be loaded directly
//! with [`GemRegistry::load_project`].
//!
//! # Example
//!
//! ```
//! use gemreg::registry::{GemRegistry, SearchPath};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let mut registry = GemRegistry::new();
//! registry.add_search_path(SearchPath::new(temp.path()), true).unwrap();
//! assert_eq!(registry.gem_count(), 0);
//! ```

pub mod catalog;
pub mod scan;
pub mod search;

// Re-exports
pub use catalog::GemRegistry;
pub use scan::{find_description_files, ScanResult};
pub use search::SearchPath;
