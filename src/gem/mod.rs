//! Gem descriptions.
//!
//! A gem is an independently versioned plugin. Each gem directory carries a
//! `gem.json` description which is parsed into a [`GemDescription`]:
//! - Identifiers in [`id`]
//! - Module declarations in [`module`]
//! - The on-disk format and its upgrades in [`schema`]
//! - Parsing and accessors in [`description`]
//!
//! # Example
//!
//! ```
//! use gemreg::gem::{GemDescription, ModuleType};
//! use std::path::Path;
//!
//! let json = r#"{
//!     "GemFormatVersion": 4,
//!     "Uuid": "e5f049ad7f534847a89c27b7339cf6a6",
//!     "Name": "Camera",
//!     "Version": "0.1.0",
//!     "Modules": [{ "Type": "GameModule" }]
//! }"#;
//! let gem = GemDescription::parse_str(json, Path::new("Camera"), Path::new("/gems/Camera")).unwrap();
//! assert_eq!(gem.modules_of_type(ModuleType::EditorModule).len(), 1);
//! ```

pub mod description;
pub mod id;
pub mod module;
pub mod schema;

pub use description::GemDescription;
pub use id::GemId;
pub use module::{LinkType, ModuleDefinition, ModuleId, ModuleType};
pub use schema::{
    upgrade_description, GEM_DEFINITION_FILENAME, GEM_FORMAT_VERSION, MIN_GEM_FORMAT_VERSION,
};
