//! Collecting, sampling and queueing tracks.

pub mod collector;
pub mod orchestrator;
pub mod selector;

pub use collector::{Collector, DEFAULT_MAX_DEPTH};
pub use orchestrator::{build_commands, sorted_tracks, Orchestrator, PlaybackOptions};
pub use selector::select;
