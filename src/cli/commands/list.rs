//! List command implementation.
//!
//! The `gemreg list` command lists every registered gem version and marks
//! the ones the project enables.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::{GemError, Result};
use crate::gem::{GemDescription, GemId};
use crate::ui::theme::GemTheme;
use crate::ui::UserInterface;
use crate::version::Version;

use super::dispatcher::{Command, CommandResult};
use super::workspace::{setup_failure, Workspace, WorkspaceOptions};

/// One row of `list --json`.
#[derive(Debug, Serialize)]
struct GemRow<'a> {
    id: GemId,
    name: &'a str,
    version: Version,
    path: String,
    required: bool,
    enabled: bool,
}

/// The list command implementation.
pub struct ListCommand {
    options: WorkspaceOptions,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(options: WorkspaceOptions, args: ListArgs) -> Self {
        Self { options, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ws = match Workspace::open(&self.options) {
            Ok(ws) => ws,
            Err(e) => return setup_failure(ui, e),
        };
        ws.report_warnings(ui);

        let gems: Vec<&GemDescription> = if self.args.required {
            ws.registry.all_required()
        } else {
            ws.registry.all()
        };
        let is_enabled = |gem: &GemDescription| {
            ws.settings
                .as_ref()
                .is_some_and(|s| s.is_gem_version_enabled(&gem.specifier()))
        };

        if self.args.json {
            let rows: Vec<GemRow> = gems
                .iter()
                .map(|gem| GemRow {
                    id: gem.id(),
                    name: gem.name(),
                    version: gem.version(),
                    path: gem.absolute_path().display().to_string(),
                    required: gem.is_required(),
                    enabled: is_enabled(gem),
                })
                .collect();
            let json = serde_json::to_string_pretty(&rows).map_err(|e| GemError::Other(e.into()))?;
            ui.data(&json);
            return Ok(CommandResult::success());
        }

        if gems.is_empty() {
            ui.message("No gems found.");
            return Ok(CommandResult::success());
        }

        let theme = GemTheme::detect();
        if let Some(settings) = &ws.settings {
            ui.show_header(&format!("Gems for {}", settings.project_name()));
        }
        for gem in gems {
            let marker = if is_enabled(gem) {
                theme.enabled.apply_to("[x]").to_string()
            } else {
                "[ ]".to_string()
            };
            ui.message(&format!(
                "  {} {} {} {}",
                marker,
                theme.highlight.apply_to(gem.name()),
                gem.version(),
                theme.dim.apply_to(gem.id())
            ));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::workspace::fixtures::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn list(root: &std::path::Path, project: Option<&str>, args: ListArgs) -> (CommandResult, MockUI) {
        let cmd = ListCommand::new(
            WorkspaceOptions::new(root, project.map(str::to_string)),
            args,
        );
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn lists_all_gems() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let (result, ui) = list(temp.path(), None, ListArgs::default());
        assert!(result.success);
        assert!(ui.has_message("Camera 1.0.0"));
        assert!(ui.has_message("Physics 2.0.0"));
    }

    #[test]
    fn marks_enabled_gems() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        fs::write(
            temp.path().join("Sandbox/gems.json"),
            format!(
                r#"{{ "GemListFormatVersion": 2, "Gems": [
                    {{ "Uuid": "{CAMERA_ID}", "Version": "1.0.0", "Path": "Gems/Camera" }}
                ] }}"#
            ),
        )
        .unwrap();

        let (_, ui) = list(temp.path(), Some("Sandbox"), ListArgs::default());
        assert!(ui.has_message("[x] Camera"));
        assert!(ui.has_message("[ ] Physics"));
        assert_eq!(ui.headers(), ["Gems for Sandbox".to_string()]);
    }

    #[test]
    fn json_output_is_parseable() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let args = ListArgs {
            json: true,
            ..Default::default()
        };
        let (_, ui) = list(temp.path(), None, args);
        let rows: serde_json::Value = serde_json::from_str(&ui.data_lines()[0]).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 2);
        assert_eq!(rows[0]["enabled"], false);
    }

    #[test]
    fn required_filter() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let args = ListArgs {
            required: true,
            ..Default::default()
        };
        let (_, ui) = list(temp.path(), None, args);
        assert!(ui.has_message("No gems found."));
    }

    #[test]
    fn missing_project_exits_2() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let (result, ui) = list(temp.path(), Some("Missing"), ListArgs::default());
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Project file not found"));
    }
}
