//! Command-line interface for rompr-remote.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    BrowseCliArgs, CallArgs, Cli, CommandCliArgs, Commands, CompletionsArgs, PlayCliArgs,
    PlayRandomCliArgs, PlaylistCliArgs, QueueFlags,
};
pub use commands::{CommandDispatcher, CommandResult};
