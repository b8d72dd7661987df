//! Integration tests for the gemreg binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CAMERA: &str = "e5f049ad7f534847a89c27b7339cf6a6";
const PHYSICS: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90";

fn write_gem(root: &Path, name: &str, id: &str, version: &str, deps: &str) {
    let dir = root.join("Gems").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("gem.json"),
        format!(
            r#"{{
                "GemFormatVersion": 4,
                "Uuid": "{id}",
                "Name": "{name}",
                "Version": "{version}",
                "Modules": [{{ "Type": "GameModule" }}],
                "Dependencies": [{deps}]
            }}"#
        ),
    )
    .unwrap();
}

/// App root with a `.gemreg` config selecting the `Sandbox` project.
fn setup_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".gemreg");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yml"), "project: Sandbox\n").unwrap();

    write_gem(temp.path(), "Camera", CAMERA, "1.0.0", "");
    write_gem(
        temp.path(),
        "Physics",
        PHYSICS,
        "2.0.0",
        &format!(r#"{{ "Uuid": "{CAMERA}", "VersionConstraints": [">=1.0.0"] }}"#),
    );

    let project = temp.path().join("Sandbox");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("project.json"), r#"{ "project_name": "Sandbox" }"#).unwrap();
    fs::write(
        project.join("gems.json"),
        r#"{ "GemListFormatVersion": 2, "Gems": [] }"#,
    )
    .unwrap();
    temp
}

fn gemreg(root: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("gemreg"));
    cmd.current_dir(root)
        .env_remove("GEMREG_ROOT")
        .env_remove("GEMREG_PROJECT")
        .env_remove("GEMREG_ENGINE_ROOT")
        .env_remove("GEMREG_ENGINE_VERSION")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("gemreg"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Gem discovery"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("gemreg"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_list_finds_gems() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();
    gemreg(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Camera 1.0.0"))
        .stdout(predicate::str::contains("Physics 2.0.0"));
    Ok(())
}

#[test]
fn cli_list_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();
    let output = gemreg(temp.path()).args(["list", "--json"]).output()?;
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn cli_enable_then_validate() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();

    gemreg(temp.path())
        .args(["enable", "Physics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enabled Physics 2.0.0"))
        .stderr(predicate::str::contains("not enabled"));

    gemreg(temp.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"Camera\", which is not enabled"));

    gemreg(temp.path())
        .args(["enable", "Camera"])
        .assert()
        .success();

    gemreg(temp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 2 enabled gems"));

    let ledger = fs::read_to_string(temp.path().join("Sandbox/gems.json"))?;
    assert!(ledger.contains("\"Path\": \"Gems/Camera\""));
    Ok(())
}

#[test]
fn cli_check_exit_codes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();
    gemreg(temp.path()).args(["enable", "Camera"]).assert().success();

    gemreg(temp.path())
        .args(["check", "Camera", ">=1.0.0"])
        .assert()
        .success();
    gemreg(temp.path())
        .args(["check", "Camera", ">=1.1.0"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn cli_disable_requires_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();
    gemreg(temp.path()).args(["disable", "Camera"]).assert().failure();
    Ok(())
}

#[test]
fn cli_show_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();
    let output = gemreg(temp.path())
        .args(["show", CAMERA, "--json"])
        .output()?;
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(doc["name"], "Camera");
    Ok(())
}

#[test]
fn cli_missing_project_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();
    gemreg(temp.path())
        .args(["--project", "Missing", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Project file not found"));
    Ok(())
}

#[test]
fn cli_engine_version_mismatch_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_workspace();
    let dir = temp.path().join("Gems").join("Camera");
    let json = fs::read_to_string(dir.join("gem.json"))?
        .replace("\"Version\": \"1.0.0\",", "\"Version\": \"1.0.0\", \"LumberyardVersion\": [\">=2.0.0\"],");
    fs::write(dir.join("gem.json"), json)?;
    gemreg(temp.path()).args(["enable", "Camera"]).assert().success();

    gemreg(temp.path())
        .args(["validate", "--engine-version", "1.5.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requires engine version >=2.0.0"));
    Ok(())
}

#[test]
fn cli_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("gemreg"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gemreg"));
    Ok(())
}
