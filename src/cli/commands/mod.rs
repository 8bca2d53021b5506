//! CLI command implementations.
//!
//! Commands are dispatched via [`CommandDispatcher`], which turns each
//! subcommand into a tool call and prints the result as JSON. `serve`
//! keeps one toolbox, and so one listing cache, alive across many calls.

pub mod completions;
pub mod dispatcher;
pub mod serve;

pub use dispatcher::{CommandDispatcher, CommandResult};
pub use serve::{serve, ServeResponse};
