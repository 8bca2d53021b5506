//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands to the toolbox

use std::io::Write;
use std::sync::Arc;

use crate::cli::args::Commands;
use crate::config::Settings;
use crate::error::Result;
use crate::gateway::{HttpGateway, PlayerGateway};
use crate::tools::Toolbox;

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

/// Dispatches CLI commands to a toolbox.
pub struct CommandDispatcher<G: ?Sized = HttpGateway> {
    toolbox: Toolbox<G>,
}

impl CommandDispatcher<HttpGateway> {
    /// Create a dispatcher talking to the player API described by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let gateway = Arc::new(HttpGateway::from_settings(settings)?);
        tracing::debug!("Using player API at {}", gateway.base_url());
        Ok(Self::new(Toolbox::from_settings(gateway, settings)))
    }
}

impl<G: PlayerGateway + ?Sized> CommandDispatcher<G> {
    /// Create a dispatcher around an existing toolbox.
    pub fn new(toolbox: Toolbox<G>) -> Self {
        Self { toolbox }
    }

    /// Dispatch and execute a command, writing its JSON result to `out`.
    ///
    /// `serve` reads stdin and writes stdout directly; `completions` is
    /// handled before settings are loaded and is a no-op here.
    pub async fn dispatch(&self, command: &Commands, out: &mut dyn Write) -> Result<CommandResult> {
        if let Commands::Serve = command {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            super::serve::serve(&self.toolbox, stdin, tokio::io::stdout()).await?;
            return Ok(CommandResult::success());
        }

        let Some(call) = command.tool_call()? else {
            return Ok(CommandResult::success());
        };

        let result = self.toolbox.call(call).await?;
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        Ok(CommandResult::success())
    }
}
