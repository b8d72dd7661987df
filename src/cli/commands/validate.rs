//! Validate command implementation.
//!
//! The `gemreg validate` command checks that every enabled gem's
//! dependencies are enabled at matching versions.

use crate::cli::args::ValidateArgs;
use crate::error::{GemError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::{missing_project, setup_failure, Workspace, WorkspaceOptions};

/// The validate command implementation.
pub struct ValidateCommand {
    options: WorkspaceOptions,
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(options: WorkspaceOptions, args: ValidateArgs) -> Self {
        Self { options, args }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ws = match Workspace::open(&self.options) {
            Ok(ws) => ws,
            Err(e) => return setup_failure(ui, e),
        };
        let Some(settings) = ws.settings.as_ref() else {
            return Ok(missing_project(ui));
        };
        ws.report_warnings(ui);

        let engine_version = self
            .args
            .engine_version
            .unwrap_or_else(|| ws.config().engine_version());
        let report = settings.validate_dependencies(&ws.registry, engine_version);

        if self.args.json {
            let text =
                serde_json::to_string_pretty(&report).map_err(|e| GemError::Other(e.into()))?;
            ui.data(&text);
        } else {
            for warning in report.warnings() {
                ui.warning(warning);
            }
            for error in report.errors() {
                ui.error(&error.detail);
            }
            if report.is_valid() {
                ui.success(&format!(
                    "All {} enabled gems have their dependencies met",
                    settings.gems().len()
                ));
            }
        }

        if report.is_valid() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
