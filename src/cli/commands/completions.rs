//! Shell completions generation.
//!
//! The `rompr-remote completions` command generates shell completion scripts.

use std::io::Write;

use clap::CommandFactory;

use super::dispatcher::CommandResult;
use crate::cli::args::{Cli, CompletionsArgs};

const BIN_NAME: &str = "rompr-remote";

/// Write the completion script for `args.shell` to `out`.
pub fn generate(args: &CompletionsArgs, out: &mut dyn Write) -> CommandResult {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, BIN_NAME, out);
    CommandResult::success()
}
