//! Show command implementation.
//!
//! The `gemreg show` command prints one gem description.

use serde_json::{json, Value};

use crate::cli::args::ShowArgs;
use crate::error::{GemError, Result};
use crate::gem::GemDescription;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::{setup_failure, Workspace, WorkspaceOptions};

/// The show command implementation.
pub struct ShowCommand {
    options: WorkspaceOptions,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(options: WorkspaceOptions, args: ShowArgs) -> Self {
        Self { options, args }
    }

    fn dependency_label(ws: &Workspace, gem: &GemDescription, index: usize) -> String {
        let dependency = &gem.dependencies()[index];
        let name = ws
            .registry
            .get_latest(dependency.id())
            .map(|d| d.name().to_string())
            .unwrap_or_else(|| dependency.id().to_string());
        if dependency.bounds().is_empty() {
            name
        } else {
            format!("{} {}", name, dependency.bounds_string())
        }
    }
}

fn to_json(gem: &GemDescription, enabled: bool) -> Value {
    let modules: Vec<Value> = gem
        .modules()
        .iter()
        .map(|module| {
            json!({
                "name": module.name(),
                "type": module.module_type(),
                "link_type": module.link_type(),
                "file_name": module.file_name(),
                "extends": gem.parent_of(module).map(|p| p.name()),
            })
        })
        .collect();
    let dependencies: Vec<Value> = gem
        .dependencies()
        .iter()
        .map(|d| {
            json!({
                "id": d.id(),
                "bounds": d.bounds().iter().map(|b| b.to_string()).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "id": gem.id(),
        "name": gem.name(),
        "display_name": gem.display_name(),
        "version": gem.version(),
        "path": gem.absolute_path().display().to_string(),
        "summary": gem.summary(),
        "tags": gem.tags(),
        "required": gem.is_required(),
        "game_gem": gem.is_game_gem(),
        "enabled": enabled,
        "engine_bounds": gem.engine_dependency().map(|d| d.bounds_string()),
        "dependencies": dependencies,
        "modules": modules,
    })
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ws = match Workspace::open(&self.options) {
            Ok(ws) => ws,
            Err(e) => return setup_failure(ui, e),
        };
        ws.report_warnings(ui);

        let Some(gem) = ws.find_gem(&self.args.gem, self.args.version) else {
            let wanted = match self.args.version {
                Some(v) => format!("{} {}", self.args.gem, v),
                None => self.args.gem.clone(),
            };
            ui.error(&format!("Gem '{}' not found", wanted));
            return Ok(CommandResult::failure(1));
        };
        let enabled = ws
            .settings
            .as_ref()
            .is_some_and(|s| s.is_gem_version_enabled(&gem.specifier()));

        if self.args.json {
            let text = serde_json::to_string_pretty(&to_json(gem, enabled))
                .map_err(|e| GemError::Other(e.into()))?;
            ui.data(&text);
            return Ok(CommandResult::success());
        }

        ui.show_header(gem.display_name());
        ui.field("Name", gem.name());
        ui.field("Id", &gem.id().to_string());
        ui.field("Version", &gem.version().to_string());
        ui.field("Path", &gem.absolute_path().display().to_string());
        if !gem.summary().is_empty() {
            ui.field("Summary", gem.summary());
        }
        if !gem.tags().is_empty() {
            ui.field("Tags", &gem.tags().join(", "));
        }
        ui.field("Required", if gem.is_required() { "yes" } else { "no" });
        ui.field("Enabled", if enabled { "yes" } else { "no" });
        if let Some(engine) = gem.engine_dependency() {
            ui.field("Engine", &engine.bounds_string());
        }
        for index in 0..gem.dependencies().len() {
            ui.field("Depends on", &Self::dependency_label(&ws, gem, index));
        }
        for module in gem.modules() {
            let mut line = format!("{} ({})", module.name(), module.module_type().as_str());
            if let Some(parent) = gem.parent_of(module) {
                line.push_str(&format!(" extends {}", parent.name()));
            }
            if let Some(file) = module.file_name() {
                line.push_str(&format!(" -> {}", file));
            }
            ui.field("Module", &line);
        }

        Ok(CommandResult::success())
    }
}
