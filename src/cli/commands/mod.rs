//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that read gems share
//! the loading in [`workspace`].

pub mod check;
pub mod completions;
pub mod disable;
pub mod dispatcher;
pub mod enable;
pub mod list;
pub mod show;
pub mod validate;
pub mod workspace;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use workspace::{Workspace, WorkspaceOptions};
