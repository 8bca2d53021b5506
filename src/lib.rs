//! rompr-remote - Remote control for a RompR music player.
//!
//! Browses the player's library over its web API, queues tracks, and picks
//! random selections from whole library subtrees. Recursive listings are
//! memoized per `(path, skip pattern)` with a TTL so repeated random picks
//! from the same folder do not walk the library again.
//!
//! # Modules
//!
//! - [`cache`] - TTL listing cache and clocks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and validation
//! - [`error`] - Error types and result aliases
//! - [`gateway`] - Player API access (HTTP and in-memory)
//! - [`library`] - Listing types, path decoding and skip rules
//! - [`playback`] - Recursive collection, random selection and queueing
//! - [`tools`] - The callable tool surface
//!
//! # Example
//!
//! ```
//! use rompr_remote::library::SkipRule;
//!
//! let rule = SkipRule::new(Some("(?i)live"), Some("Audiobooks")).unwrap();
//! assert!(rule.should_skip("Artist/Live at Leeds"));
//! assert!(rule.should_skip("Audiobooks/Dune"));
//! assert!(!rule.should_skip("Artist/Studio Album"));
//! ```
//!
//! For end-to-end collection against a scripted gateway, see the
//! integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod library;
pub mod playback;
pub mod tools;

pub use error::{RemoteError, Result};
