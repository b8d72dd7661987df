//! Check command implementation.
//!
//! `gemreg check <gem> <constraint>...` exits 0 when the project enables the
//! gem at a version meeting every constraint.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::{missing_project, setup_failure, Workspace, WorkspaceOptions};

/// The check command implementation.
pub struct CheckCommand {
    options: WorkspaceOptions,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(options: WorkspaceOptions, args: CheckArgs) -> Self {
        Self { options, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ws = match Workspace::open(&self.options) {
            Ok(ws) => ws,
            Err(e) => return setup_failure(ui, e),
        };
        let Some(settings) = ws.settings.as_ref() else {
            return Ok(missing_project(ui));
        };
        let Some(id) = ws.resolve_id(&self.args.gem) else {
            ui.error(&format!("Gem '{}' not found", self.args.gem));
            return Ok(CommandResult::failure(1));
        };

        let constraints = self.args.constraints.join(", ");
        if settings.is_gem_enabled(id, &self.args.constraints)? {
            ui.success(&format!("{} is enabled ({})", self.args.gem, constraints));
            return Ok(CommandResult::success());
        }

        match settings.enabled_version(id) {
            Some(version) => ui.error(&format!(
                "{} is enabled at {}, which does not match {}",
                self.args.gem, version, constraints
            )),
            None => ui.error(&format!("{} is not enabled", self.args.gem)),
        }
        Ok(CommandResult::failure(1))
    }
}
