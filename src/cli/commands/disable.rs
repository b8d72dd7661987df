//! Disable command implementation.

use tracing::debug;

use crate::cli::args::DisableArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::version::Specifier;

use super::dispatcher::{Command, CommandResult};
use super::workspace::{missing_project, setup_failure, Workspace, WorkspaceOptions};

/// The disable command implementation.
pub struct DisableCommand {
    options: WorkspaceOptions,
    args: DisableArgs,
}

impl DisableCommand {
    /// Create a new disable command.
    pub fn new(options: WorkspaceOptions, args: DisableArgs) -> Self {
        Self { options, args }
    }
}

impl Command for DisableCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ws = match Workspace::open(&self.options) {
            Ok(ws) => ws,
            Err(e) => return setup_failure(ui, e),
        };
        ws.report_warnings(ui);

        let Some(id) = ws.resolve_id(&self.args.gem) else {
            ui.error(&format!("Gem '{}' not found", self.args.gem));
            return Ok(CommandResult::failure(1));
        };
        let Some(settings) = ws.settings.as_mut() else {
            return Ok(missing_project(ui));
        };

        let previous = settings.gems().clone();
        if !settings.disable_gem(&Specifier::new(id, self.args.version)) {
            ui.error(&format!(
                "{} version {} is not enabled",
                self.args.gem, self.args.version
            ));
            return Ok(CommandResult::failure(1));
        }

        if let Err(e) = settings.save(Some(&ws.registry)) {
            debug!("Save failed, restoring {} previously enabled gems", previous.len());
            settings.set_gems(previous);
            return Err(e);
        }
        ui.success(&format!("Disabled {} {}", self.args.gem, self.args.version));
        Ok(CommandResult::success())
    }
}
