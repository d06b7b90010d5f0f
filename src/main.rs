//! Cachesweep CLI entry point.

use std::process::ExitCode;

use cachesweep::cli::{Cli, CommandDispatcher};
use cachesweep::ui::{create_ui, OutputMode};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `--quiet` flag sets level to WARN
/// 3. `RUST_LOG` environment variable (if set)
/// 4. Default is INFO
///
/// Logs go to stderr so stdout stays clean for `--json` and completions.
fn init_tracing(debug: bool, quiet: bool, no_color: bool) {
    let filter = if debug {
        EnvFilter::new("cachesweep=debug")
    } else if quiet {
        EnvFilter::new("cachesweep=warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cachesweep=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(!no_color)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    init_tracing(cli.debug, cli.quiet, cli.no_color);

    tracing::debug!("Cachesweep starting with args: {:?}", cli);

    let mut ui = create_ui(OutputMode::from_flags(cli.quiet, cli.verbose));
    let dispatcher = CommandDispatcher::new(cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
