//! gemreg CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use gemreg::cli::{Cli, CommandDispatcher, WorkspaceOptions};
use gemreg::config::find_app_root;
use gemreg::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so `--json` output stays clean.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("gemreg=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gemreg=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("gemreg starting with args: {:?}", cli);

    let output_mode = OutputMode::from_quiet(cli.quiet);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let cwd = std::env::current_dir().unwrap_or_default();
    let app_root = cli
        .root
        .clone()
        .or_else(|| find_app_root(&cwd))
        .unwrap_or(cwd);

    let mut ui = create_ui(output_mode, cli.no_color);
    let dispatcher = CommandDispatcher::new(WorkspaceOptions::new(app_root, cli.project.clone()));

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
