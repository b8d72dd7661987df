//! Integration tests for the registry public API.

use gemreg::gem::{GemId, ModuleType};
use gemreg::project::ProjectSettings;
use gemreg::registry::{GemRegistry, SearchPath};
use gemreg::version::Version;
use gemreg::GemError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CAMERA: &str = "e5f049ad7f534847a89c27b7339cf6a6";
const LEGACY: &str = "0123456789abcdef0123456789abcdef";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn camera_json(version: &str) -> String {
    format!(
        r#"{{
            "GemFormatVersion": 4,
            "Uuid": "{CAMERA}",
            "Name": "Camera",
            "Version": "{version}",
            "Modules": [
                {{ "Type": "GameModule" }},
                {{ "Type": "EditorModule", "Name": "Editor", "Extends": "GameModule" }}
            ]
        }}"#
    )
}

#[test]
fn public_api_accessible() {
    let registry = GemRegistry::new();
    assert_eq!(registry.gem_count(), 0);
    assert!(registry.search_paths().is_empty());
}

#[test]
fn scans_nested_and_legacy_gems() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("Gems/Camera/gem.json"), &camera_json("1.0.0"));
    write(
        &temp.path().join("Gems/Camera/Nested/Legacy/Gem.json"),
        &format!(
            r#"{{
                "GemFormatVersion": 3,
                "Uuid": "{LEGACY}",
                "Name": "Legacy",
                "Version": "0.1.0",
                "LinkType": "Dynamic"
            }}"#
        ),
    );

    let (registry, error) = GemRegistry::scan([SearchPath::new(temp.path().join("Gems"))]);
    assert!(error.is_none());
    assert_eq!(registry.gem_count(), 2);

    let legacy = registry
        .get(GemId::parse(LEGACY).unwrap(), Version::new(0, 1, 0))
        .unwrap();
    assert_eq!(legacy.modules().len(), 1);
    assert_eq!(legacy.modules_of_type(ModuleType::EditorModule).len(), 1);

    let camera = registry.find_by_name("camera").unwrap();
    let editor = camera.module_by_name("Editor").unwrap();
    assert_eq!(camera.parent_of(editor).unwrap().name(), "GameModule");
}

#[test]
fn scan_keeps_good_gems_when_some_fail() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("Gems/Camera/gem.json"), &camera_json("1.0.0"));
    write(&temp.path().join("Gems/Broken/gem.json"), r#"{ "GemFormatVersion": 4 }"#);

    let mut registry = GemRegistry::new();
    registry
        .add_search_path(SearchPath::new(temp.path().join("Gems")), false)
        .unwrap();
    let err = registry.load_all_gems_from_disk().unwrap_err();

    assert!(matches!(err, GemError::ScanFailed { .. }));
    assert!(err.to_string().contains("Broken"));
    assert_eq!(registry.gem_count(), 1);
}

#[test]
fn latest_version_wins() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("Gems/Camera-1/gem.json"), &camera_json("1.0.0"));
    write(&temp.path().join("Gems/Camera-2/gem.json"), &camera_json("1.2.0"));

    let (registry, _) = GemRegistry::scan([SearchPath::new(temp.path().join("Gems"))]);
    let id = GemId::parse(CAMERA).unwrap();
    assert_eq!(registry.versions_of(id), vec![Version::new(1, 0, 0), Version::new(1, 2, 0)]);
    assert_eq!(registry.get_latest(id).unwrap().version(), Version::new(1, 2, 0));
}

#[test]
fn load_project_resolves_under_app_root() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("External/Camera/gem.json"), &camera_json("1.0.0"));
    write(
        &temp.path().join("Sandbox/project.json"),
        r#"{ "project_name": "Sandbox" }"#,
    );
    write(
        &temp.path().join("Sandbox/gems.json"),
        &format!(
            r#"{{ "GemListFormatVersion": 2, "Gems": [
                {{ "Uuid": "{CAMERA}", "Version": "1.0.0", "Path": "External/Camera" }}
            ] }}"#
        ),
    );

    let settings = ProjectSettings::initialize(temp.path(), "Sandbox").unwrap();
    let mut registry = GemRegistry::new();
    registry.load_project(&settings, false).unwrap();
    assert_eq!(registry.gem_count(), 1);

    let report = settings.validate_dependencies(&registry, Version::ZERO);
    assert!(report.is_valid());
}

#[test]
fn load_project_is_all_or_nothing() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("Gems/Camera/gem.json"), &camera_json("1.0.0"));
    write(
        &temp.path().join("Sandbox/project.json"),
        r#"{ "project_name": "Sandbox" }"#,
    );
    write(
        &temp.path().join("Sandbox/gems.json"),
        &format!(
            r#"{{ "GemListFormatVersion": 2, "Gems": [
                {{ "Uuid": "{CAMERA}", "Version": "1.0.0", "Path": "Gems/Camera" }},
                {{ "Uuid": "{LEGACY}", "Version": "0.1.0", "Path": "Gems/Missing" }}
            ] }}"#
        ),
    );

    let settings = ProjectSettings::initialize(temp.path(), "Sandbox").unwrap();
    let mut registry = GemRegistry::new();
    let err = registry.load_project(&settings, false).unwrap_err();
    assert!(matches!(err, GemError::DescriptionNotFound { .. }));
    assert_eq!(registry.gem_count(), 0);
}
