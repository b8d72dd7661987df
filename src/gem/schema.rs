//! On-disk gem description format and schema upgrades.
//!
//! Older documents are upgraded one format version at a time into the
//! current shape before any field is read. Upgrading never mutates the
//! caller's document.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::module::LinkType;
use crate::error::{GemError, Result};

/// File name of a gem description, matched case-insensitively on scan.
pub const GEM_DEFINITION_FILENAME: &str = "gem.json";

/// Format version written by current tooling.
pub const GEM_FORMAT_VERSION: i64 = 4;

/// Oldest format version that can still be upgraded.
pub const MIN_GEM_FORMAT_VERSION: i64 = 2;

pub(crate) const FORMAT_VERSION_KEY: &str = "GemFormatVersion";

/// Description fields as they appear in a current-format document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawGemDescription {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub uuid: String,
    pub version: String,
    #[serde(default)]
    pub lumberyard_version: Option<OneOrMany>,
    #[serde(default)]
    pub dependencies: Vec<RawDependency>,
    #[serde(default)]
    pub is_game_gem: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub engine_module_class: Option<String>,
    #[serde(default)]
    pub modules: Vec<RawModule>,
    #[serde(default)]
    pub is_legacy_module_init: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawDependency {
    pub uuid: String,
    #[serde(default)]
    pub version_constraints: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawModule {
    #[serde(rename = "Type")]
    pub module_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link_type: Option<LinkType>,
    #[serde(default)]
    pub extends: Option<String>,
}

/// A single constraint string or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Produce a current-format copy of a description document.
///
/// `path` is only used for error reporting.
pub fn upgrade_description(doc: &Value, path: &Path) -> Result<Value> {
    let parse_error = |message: String| GemError::DescriptionParse {
        path: path.to_path_buf(),
        message,
    };

    let object = doc
        .as_object()
        .ok_or_else(|| parse_error("top level is not a JSON object".to_string()))?;

    let found = object
        .get(FORMAT_VERSION_KEY)
        .ok_or_else(|| parse_error(format!("missing field `{}`", FORMAT_VERSION_KEY)))?
        .as_i64()
        .ok_or_else(|| parse_error(format!("`{}` must be an integer", FORMAT_VERSION_KEY)))?;

    if !(MIN_GEM_FORMAT_VERSION..=GEM_FORMAT_VERSION).contains(&found) {
        return Err(GemError::UnsupportedFormat {
            path: path.to_path_buf(),
            found,
            min: MIN_GEM_FORMAT_VERSION,
            max: GEM_FORMAT_VERSION,
        });
    }

    let mut upgraded = object.clone();
    for from in found..GEM_FORMAT_VERSION {
        match from {
            2 => upgrade_v2_to_v3(&mut upgraded),
            3 => upgrade_v3_to_v4(&mut upgraded).map_err(parse_error)?,
            _ => unreachable!("format range checked above"),
        }
        upgraded.insert(FORMAT_VERSION_KEY.to_string(), json!(from + 1));
    }

    Ok(Value::Object(upgraded))
}

/// v2 gems initialize their modules through the old entry point.
fn upgrade_v2_to_v3(doc: &mut Map<String, Value>) {
    doc.insert("IsLegacyModuleInit".to_string(), Value::Bool(true));
}

/// v3 carried one link type and boolean module flags; v4 lists modules.
fn upgrade_v3_to_v4(doc: &mut Map<String, Value>) -> std::result::Result<(), String> {
    let link_type = match doc.remove("LinkType") {
        None => LinkType::Dynamic,
        Some(value) => serde_json::from_value::<LinkType>(value)
            .map_err(|e| format!("invalid legacy `LinkType`: {}", e))?,
    };
    let editor = take_flag(doc, "EditorModule")?;
    let server = take_flag(doc, "ServerModule")?;

    let mut modules = Vec::new();
    if link_type != LinkType::NoCode {
        let link = link_type.as_str();
        modules.push(json!({ "Type": "GameModule", "LinkType": link }));
        if server {
            modules.push(json!({
                "Type": "ServerModule",
                "Name": "Server",
                "LinkType": link,
                "Extends": "GameModule"
            }));
        }
        if editor {
            modules.push(json!({
                "Type": "EditorModule",
                "Name": "Editor",
                "LinkType": link,
                "Extends": "GameModule"
            }));
        }
    }

    doc.insert("Modules".to_string(), Value::Array(modules));
    Ok(())
}

fn take_flag(doc: &mut Map<String, Value>, key: &str) -> std::result::Result<bool, String> {
    match doc.remove(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(other) => Err(format!("legacy `{}` must be a boolean, found {}", key, other)),
    }
}
