//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::Path;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::workspace::WorkspaceOptions;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    options: WorkspaceOptions,
}

impl CommandDispatcher {
    /// Create a new dispatcher for an application root and optional project.
    pub fn new(options: WorkspaceOptions) -> Self {
        Self { options }
    }

    /// Get the application root path.
    pub fn app_root(&self) -> &Path {
        &self.options.app_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = self.options.clone();
        match &cli.command {
            Commands::List(args) => super::list::ListCommand::new(options, args.clone()).execute(ui),
            Commands::Show(args) => super::show::ShowCommand::new(options, args.clone()).execute(ui),
            Commands::Enable(args) => {
                super::enable::EnableCommand::new(options, args.clone()).execute(ui)
            }
            Commands::Disable(args) => {
                super::disable::DisableCommand::new(options, args.clone()).execute(ui)
            }
            Commands::Check(args) => {
                super::check::CheckCommand::new(options, args.clone()).execute(ui)
            }
            Commands::Validate(args) => {
                super::validate::ValidateCommand::new(options, args.clone()).execute(ui)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}
