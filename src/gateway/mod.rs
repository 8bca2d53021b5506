//! Access to the remote player API.
//!
//! [`PlayerGateway`] is the only surface the playback core depends on:
//! list one directory, run a batch of player commands, read the queue.
//! [`HttpGateway`] talks to a RompR web API; [`MockGateway`] serves an
//! in-memory library for tests.

pub mod http;
pub mod markup;
pub mod mock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::library::Directory;

pub use http::HttpGateway;
pub use markup::parse_directory;
pub use mock::MockGateway;

/// Player status as reported by the API. Opaque to this crate.
pub type Status = Value;

/// One entry of the player queue, keyed by attribute name.
pub type QueueTrack = Map<String, Value>;

/// A player command, e.g. `["add", "Artist/Album/01.mp3"]`.
pub type PlayerCommand = Vec<String>;

/// Operations the player API offers.
///
/// Each call is a suspension point and carries its own timeout; a timeout
/// surfaces as an ordinary gateway error.
#[async_trait]
pub trait PlayerGateway: Send + Sync {
    /// List the immediate files and folders at `path` (`""` is the root).
    ///
    /// Paths in the returned listing are percent-encoded as the API sends them.
    async fn fetch_directory(&self, path: &str) -> Result<Directory>;

    /// Execute commands in order and return the resulting player status.
    async fn run_commands(&self, commands: &[PlayerCommand]) -> Result<Status>;

    /// Execute a playback batch (clear, adds, play).
    ///
    /// Same contract as [`run_commands`](Self::run_commands); implementations
    /// may allow long batches more time.
    async fn queue_batch(&self, commands: &[PlayerCommand]) -> Result<Status> {
        self.run_commands(commands).await
    }

    /// Read the current play queue.
    async fn fetch_tracklist(&self) -> Result<Vec<QueueTrack>>;
}
