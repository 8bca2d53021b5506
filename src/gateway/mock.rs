//! In-memory player gateway for testing.
//!
//! `MockGateway` serves listings from a map, records every call, and can be
//! told to fail for chosen paths.
//!
//! # Example
//!
//! ```
//! use rompr_remote::gateway::{MockGateway, PlayerGateway};
//! use rompr_remote::library::{Directory, File};
//!
//! let gateway = MockGateway::new().with_directory(
//!     "Artist/Album",
//!     Directory {
//!         files: vec![File::new("Artist/Album/01.mp3", "One", "3:00")],
//!         folders: vec![],
//!     },
//! );
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let dir = runtime
//!     .block_on(gateway.fetch_directory("Artist/Album"))
//!     .unwrap();
//!
//! assert_eq!(dir.files.len(), 1);
//! assert_eq!(gateway.fetched_paths(), vec!["Artist/Album".to_string()]);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::json;

use super::{PlayerCommand, PlayerGateway, QueueTrack, Status};
use crate::error::{RemoteError, Result};
use crate::library::Directory;

/// Scripted player gateway.
#[derive(Debug, Default)]
pub struct MockGateway {
    directories: HashMap<String, Directory>,
    failing: Mutex<HashSet<String>>,
    status: Status,
    tracklist: Vec<QueueTrack>,
    fetched: Mutex<Vec<String>>,
    commands: Mutex<Vec<Vec<PlayerCommand>>>,
}

impl MockGateway {
    /// Create an empty gateway whose status is `{"state": "stop"}`.
    pub fn new() -> Self {
        Self {
            status: json!({ "state": "stop" }),
            ..Default::default()
        }
    }

    /// Serve `directory` for `path`.
    pub fn with_directory(mut self, path: impl Into<String>, directory: Directory) -> Self {
        self.directories.insert(path.into(), directory);
        self
    }

    /// Answer command batches with `status`.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Serve `tracks` as the play queue.
    pub fn with_tracklist(mut self, tracks: Vec<QueueTrack>) -> Self {
        self.tracklist = tracks;
        self
    }

    /// Make listing `path` fail with a 500.
    pub fn fail_on(&self, path: impl Into<String>) {
        lock(&self.failing).insert(path.into());
    }

    /// Let listing `path` succeed again.
    pub fn recover(&self, path: &str) {
        lock(&self.failing).remove(path);
    }

    /// Every path listed so far, in call order.
    pub fn fetched_paths(&self) -> Vec<String> {
        lock(&self.fetched).clone()
    }

    /// Number of directory listings requested so far.
    pub fn fetch_count(&self) -> usize {
        lock(&self.fetched).len()
    }

    /// Every command batch run so far, in call order.
    pub fn command_batches(&self) -> Vec<Vec<PlayerCommand>> {
        lock(&self.commands).clone()
    }

    /// Forget recorded calls.
    pub fn reset_calls(&self) {
        lock(&self.fetched).clear();
        lock(&self.commands).clear();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl PlayerGateway for MockGateway {
    async fn fetch_directory(&self, path: &str) -> Result<Directory> {
        lock(&self.fetched).push(path.to_string());

        if lock(&self.failing).contains(path) {
            return Err(RemoteError::GatewayStatus {
                url: format!("mock://dirbrowser/{}", path),
                status: 500,
            });
        }

        self.directories
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::GatewayStatus {
                url: format!("mock://dirbrowser/{}", path),
                status: 404,
            })
    }

    async fn run_commands(&self, commands: &[PlayerCommand]) -> Result<Status> {
        lock(&self.commands).push(commands.to_vec());
        Ok(self.status.clone())
    }

    async fn fetch_tracklist(&self) -> Result<Vec<QueueTrack>> {
        Ok(self.tracklist.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::File;

    fn album() -> Directory {
        Directory {
            files: vec![File::new("A/01.mp3", "One", "1:00")],
            folders: vec![],
        }
    }

    #[tokio::test]
    async fn serves_configured_directory() {
        let gateway = MockGateway::new().with_directory("A", album());
        assert_eq!(gateway.fetch_directory("A").await.unwrap(), album());
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let gateway = MockGateway::new();
        let err = gateway.fetch_directory("missing").await.unwrap_err();
        assert!(matches!(err, RemoteError::GatewayStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn fail_on_and_recover() {
        let gateway = MockGateway::new().with_directory("A", album());

        gateway.fail_on("A");
        assert!(gateway.fetch_directory("A").await.unwrap_err().is_gateway());

        gateway.recover("A");
        assert!(gateway.fetch_directory("A").await.is_ok());
        assert_eq!(gateway.fetch_count(), 2);
    }

    #[tokio::test]
    async fn records_command_batches() {
        let gateway = MockGateway::new().with_status(json!({"state": "play"}));
        let batch = vec![vec!["play".to_string()]];

        let status = gateway.queue_batch(&batch).await.unwrap();

        assert_eq!(status["state"], "play");
        assert_eq!(gateway.command_batches(), vec![batch]);
    }

    #[tokio::test]
    async fn reset_calls_clears_log() {
        let gateway = MockGateway::new().with_directory("A", album());
        gateway.fetch_directory("A").await.unwrap();
        gateway.reset_calls();
        assert_eq!(gateway.fetch_count(), 0);
    }
}
