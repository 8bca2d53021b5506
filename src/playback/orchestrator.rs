//! Turning track selections into player command batches.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::collector::Collector;
use super::selector::select;
use crate::cache::ListingCache;
use crate::config::Settings;
use crate::error::Result;
use crate::gateway::{PlayerCommand, PlayerGateway, Status};
use crate::library::File;

/// How a batch of tracks is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Clear the queue before adding.
    pub clear_first: bool,
    /// Start playback after adding.
    pub start_playing: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            clear_first: true,
            start_playing: true,
        }
    }
}

/// Queues tracks on the player, either given explicitly or sampled at
/// random from a library subtree.
pub struct Orchestrator<G: ?Sized> {
    gateway: Arc<G>,
    collector: Collector<G>,
    rng: Mutex<StdRng>,
}

impl<G: PlayerGateway + ?Sized> Orchestrator<G> {
    /// Create an orchestrator around an existing collector.
    pub fn new(gateway: Arc<G>, collector: Collector<G>) -> Self {
        Self {
            gateway,
            collector,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create an orchestrator with a fresh cache sized by `settings`.
    pub fn from_settings(gateway: Arc<G>, settings: &Settings) -> Self {
        let cache = Arc::new(ListingCache::new(settings.cache_ttl));
        let collector = Collector::new(gateway.clone(), cache)
            .with_excluded_substring(settings.excluded_substring.clone())
            .with_max_depth(settings.max_depth);
        Self::new(gateway, collector)
    }

    /// Use a specific random source, e.g. a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// The collector feeding random selections.
    pub fn collector(&self) -> &Collector<G> {
        &self.collector
    }

    /// Queue `count` random tracks from under `path`.
    ///
    /// Tracks are drawn with replacement and queued sorted by decoded path.
    /// An empty subtree queues nothing but still runs the clear/play
    /// commands requested by `options`.
    pub async fn play_random(
        &self,
        path: &str,
        count: usize,
        options: PlaybackOptions,
        skip_pattern: Option<&str>,
    ) -> Result<Status> {
        let files = self.collector.collect(path, skip_pattern).await?;
        let tracks = self.choose_tracks(&files, count);

        tracing::info!(
            "Queueing {} random tracks from '{}' ({} candidates)",
            tracks.len(),
            path,
            files.len()
        );

        self.play_tracks(&tracks, options).await
    }

    /// Queue `tracks` sorted by path.
    ///
    /// Paths are taken as already decoded, the form `browse_directory` and
    /// the collector hand out, and are passed to the player unchanged.
    pub async fn play_tracks(&self, tracks: &[String], options: PlaybackOptions) -> Result<Status> {
        let tracks = sorted_tracks(tracks.iter().map(String::as_str));
        let commands = build_commands(&tracks, options);
        self.gateway.queue_batch(&commands).await
    }

    /// Sample `count` files and return their paths, sorted.
    pub fn choose_tracks(&self, files: &[File], count: usize) -> Vec<String> {
        let chosen = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            select(files, count, &mut *rng)
        };

        sorted_tracks(chosen.iter().map(|f| f.path.as_str()))
    }
}

/// Sort decoded track paths lexicographically.
pub fn sorted_tracks<'a>(paths: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tracks: Vec<String> = paths.into_iter().map(str::to_string).collect();
    tracks.sort();
    tracks
}

/// Build the command batch for queueing `tracks`.
///
/// # Example
///
/// ```
/// use rompr_remote::playback::{build_commands, PlaybackOptions};
///
/// let commands = build_commands(&["a.mp3".to_string()], PlaybackOptions::default());
/// assert_eq!(commands, vec![vec!["clear"], vec!["add", "a.mp3"], vec!["play"]]);
/// ```
pub fn build_commands(tracks: &[String], options: PlaybackOptions) -> Vec<PlayerCommand> {
    let mut commands = Vec::with_capacity(tracks.len() + 2);

    if options.clear_first {
        commands.push(vec!["clear".to_string()]);
    }

    commands.extend(
        tracks
            .iter()
            .map(|track| vec!["add".to_string(), track.clone()]),
    );

    if options.start_playing {
        commands.push(vec!["play".to_string()]);
    }

    commands
}
