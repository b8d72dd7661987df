//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::version::Version;

/// gemreg - Gem discovery, enablement, and dependency checks.
#[derive(Debug, Parser)]
#[command(name = "gemreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Application root (defaults to the nearest `.gemreg` or engine.json)
    #[arg(short, long, global = true, env = "GEMREG_ROOT")]
    pub root: Option<PathBuf>,

    /// Project subfolder under the application root
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every known gem
    List(ListArgs),

    /// Show one gem's description
    Show(ShowArgs),

    /// Enable a gem for the project
    Enable(EnableArgs),

    /// Disable a gem version for the project
    Disable(DisableArgs),

    /// Check whether a gem is enabled within version constraints
    Check(CheckArgs),

    /// Validate the dependencies of the project's enabled gems
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only list gems marked as required
    #[arg(long)]
    pub required: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
#[command(disable_version_flag = true)]
pub struct ShowArgs {
    /// Gem name or id
    pub gem: String,

    /// Version to show (defaults to the latest)
    #[arg(long)]
    pub version: Option<Version>,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `enable` command.
#[derive(Debug, Clone, clap::Args)]
#[command(disable_version_flag = true)]
pub struct EnableArgs {
    /// Gem name or id
    pub gem: String,

    /// Version to enable (defaults to the latest)
    #[arg(long)]
    pub version: Option<Version>,
}

/// Arguments for the `disable` command.
#[derive(Debug, Clone, clap::Args)]
#[command(disable_version_flag = true)]
pub struct DisableArgs {
    /// Gem name or id
    pub gem: String,

    /// Enabled version to disable
    #[arg(long)]
    pub version: Version,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Gem name or id
    pub gem: String,

    /// Version constraints such as `>=1.0.0` or `~>2.1`
    #[arg(required = true)]
    pub constraints: Vec<String>,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Engine version to check gems against (overrides config)
    #[arg(long)]
    pub engine_version: Option<Version>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["gemreg", "list", "--project", "Sandbox", "--quiet"]);
        assert_eq!(cli.project.as_deref(), Some("Sandbox"));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn parses_versions() {
        let cli = Cli::parse_from(["gemreg", "disable", "Camera", "--version", "1.2.3"]);
        match cli.command {
            Commands::Disable(args) => assert_eq!(args.version, Version::new(1, 2, 3)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_versions() {
        let result = Cli::try_parse_from(["gemreg", "show", "Camera", "--version", "1.2"]);
        assert!(result.is_err());
    }

    #[test]
    fn check_requires_a_constraint() {
        assert!(Cli::try_parse_from(["gemreg", "check", "Camera"]).is_err());
        let cli = Cli::parse_from(["gemreg", "check", "Camera", ">=1.0.0", "<2.0.0"]);
        match cli.command {
            Commands::Check(args) => assert_eq!(args.constraints.len(), 2),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
