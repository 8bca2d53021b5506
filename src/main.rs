//! rompr-remote CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use rompr_remote::cli::commands::completions;
use rompr_remote::cli::{Cli, CommandDispatcher, CommandResult, Commands};
use rompr_remote::config::Settings;
use rompr_remote::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout carries JSON only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("rompr_remote=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rompr_remote=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: &Cli) -> Result<CommandResult> {
    let mut stdout = std::io::stdout();

    if let Commands::Completions(args) = &cli.command {
        return Ok(completions::generate(args, &mut stdout));
    }

    let settings = cli.apply_overrides(Settings::load(cli.env_file.as_deref())?)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let dispatcher = CommandDispatcher::from_settings(&settings)?;
    dispatcher.dispatch(&cli.command, &mut stdout).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("rompr-remote starting with args: {:?}", cli);

    match run(&cli).await {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
