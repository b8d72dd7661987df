//! Project files: the enabled-gems ledger and the project descriptor.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{GemError, Result};
use crate::gem::GemId;
use crate::version::Version;

/// File name of the enabled-gems ledger inside a project folder.
pub const GEMS_LEDGER_FILENAME: &str = "gems.json";

/// File name of the project descriptor inside a project folder.
pub const PROJECT_FILENAME: &str = "project.json";

/// The only ledger format this build reads or writes.
pub const GEM_LIST_FORMAT_VERSION: i64 = 2;

const FORMAT_VERSION_KEY: &str = "GemListFormatVersion";

/// `gems.json` as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemsLedger {
    #[serde(rename = "GemListFormatVersion")]
    pub format_version: i64,
    #[serde(rename = "Gems", default)]
    pub gems: Vec<LedgerEntry>,
}

/// One enabled gem in `gems.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(rename = "Uuid", serialize_with = "serialize_braced")]
    pub id: GemId,
    #[serde(rename = "Version")]
    pub version: Version,
    #[serde(rename = "Path")]
    pub path: String,
    /// Gem name, written for humans reading the file. Ignored on load.
    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl GemsLedger {
    pub fn new(gems: Vec<LedgerEntry>) -> Self {
        Self {
            format_version: GEM_LIST_FORMAT_VERSION,
            gems,
        }
    }

    /// Read and parse a ledger file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_project_file(path)?;
        Self::parse(&content, path)
    }

    /// Parse ledger text. Any format version other than the current one is
    /// rejected; there is no upgrade path for this file.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let parse_error = |message: String| GemError::LedgerParse {
            path: path.to_path_buf(),
            message,
        };

        let doc: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let found = doc
            .get(FORMAT_VERSION_KEY)
            .ok_or_else(|| parse_error(format!("missing field `{}`", FORMAT_VERSION_KEY)))?
            .as_i64()
            .ok_or_else(|| parse_error(format!("`{}` must be an integer", FORMAT_VERSION_KEY)))?;
        if found != GEM_LIST_FORMAT_VERSION {
            return Err(parse_error(format!(
                "`{}` is {}, expected {}",
                FORMAT_VERSION_KEY, found, GEM_LIST_FORMAT_VERSION
            )));
        }

        serde_json::from_value(doc).map_err(|e| parse_error(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GemError::Other(e.into()))
    }
}

/// `project.json`; only the name is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectDescriptor {
    pub project_name: String,
}

impl ProjectDescriptor {
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_project_file(path)?;
        serde_json::from_str(&content).map_err(|e| GemError::LedgerParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn read_project_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GemError::ProjectFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GemError::Io(e)
        }
    })
}

fn serialize_braced<S: Serializer>(id: &GemId, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.braced())
}

/// Ledger paths always use forward slashes.
pub(crate) fn path_to_ledger(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
