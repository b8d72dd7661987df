//! Enable command implementation.
//!
//! The `gemreg enable` command adds a gem version to the project ledger.

use tracing::debug;

use crate::cli::args::EnableArgs;
use crate::error::Result;
use crate::project::ProjectGemSpecifier;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::{missing_project, setup_failure, Workspace, WorkspaceOptions};

/// The enable command implementation.
pub struct EnableCommand {
    options: WorkspaceOptions,
    args: EnableArgs,
}

impl EnableCommand {
    /// Create a new enable command.
    pub fn new(options: WorkspaceOptions, args: EnableArgs) -> Self {
        Self { options, args }
    }
}

impl Command for EnableCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ws = match Workspace::open(&self.options) {
            Ok(ws) => ws,
            Err(e) => return setup_failure(ui, e),
        };
        ws.report_warnings(ui);

        let Some(gem) = ws.find_gem(&self.args.gem, self.args.version) else {
            ui.error(&format!("Gem '{}' not found", self.args.gem));
            return Ok(CommandResult::failure(1));
        };
        let spec = ProjectGemSpecifier::new(gem.id(), gem.version(), ws.ledger_path(gem));
        let name = gem.name().to_string();
        let engine_version = ws.config().engine_version();

        let Some(settings) = ws.settings.as_mut() else {
            return Ok(missing_project(ui));
        };
        let previous = settings.gems().clone();
        let version = spec.version;
        settings.enable_gem(spec);

        if let Err(e) = settings.save(Some(&ws.registry)) {
            debug!("Save failed, restoring {} previously enabled gems", previous.len());
            settings.set_gems(previous);
            return Err(e);
        }
        ui.success(&format!("Enabled {} {}", name, version));

        let report = settings.validate_dependencies(&ws.registry, engine_version);
        for error in report.errors() {
            ui.warning(&error.detail);
        }

        Ok(CommandResult::success())
    }
}
