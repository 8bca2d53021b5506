//! Runtime settings.
//!
//! Settings are resolved in layers, later layers winning:
//! 1. Built-in defaults
//! 2. `.env` file
//! 3. Process environment
//! 4. Command-line overrides (applied by the caller)

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration as StdDuration;

use chrono::Duration;

use super::env_file::{load_env_file, load_env_file_optional};
use super::ttl::{format_duration, parse_ttl};
use crate::cache::DEFAULT_TTL_SECONDS;
use crate::error::{RemoteError, Result};
use crate::library::DEFAULT_EXCLUDED_SUBSTRING;

pub const ENV_API_URL: &str = "ROMPR_API_URL";
pub const ENV_API_USER: &str = "ROMPR_API_USER";
pub const ENV_API_PASSWORD: &str = "ROMPR_API_PASSWORD";
pub const ENV_PLAYER_BACKEND: &str = "ROMPR_PLAYER_BACKEND";
pub const ENV_CACHE_TTL: &str = "ROMPR_CACHE_TTL";
pub const ENV_SKIP_SUBSTRING: &str = "ROMPR_SKIP_SUBSTRING";
pub const ENV_REQUEST_TIMEOUT: &str = "ROMPR_REQUEST_TIMEOUT";
pub const ENV_PLAYBACK_TIMEOUT: &str = "ROMPR_PLAYBACK_TIMEOUT";
pub const ENV_MAX_DEPTH: &str = "ROMPR_MAX_DEPTH";

/// Default player API location.
pub const DEFAULT_API_URL: &str = "http://localhost/rompr/api";

/// Everything needed to talk to the player and size the listing cache.
#[derive(Clone)]
pub struct Settings {
    /// Base URL of the player API, without trailing slash.
    pub base_url: String,
    /// HTTP Basic user. No auth header is sent when unset.
    pub api_user: Option<String>,
    /// HTTP Basic password.
    pub api_password: Option<String>,
    /// Value of the `player_backend` cookie.
    pub player_backend: String,
    /// How long a cached recursive listing stays fresh.
    pub cache_ttl: Duration,
    /// Paths containing this are always skipped.
    pub excluded_substring: Option<String>,
    /// Timeout for browsing, status and ad-hoc commands.
    pub request_timeout: StdDuration,
    /// Timeout for queueing batches and reading the tracklist.
    pub playback_timeout: StdDuration,
    /// Deepest directory nesting followed when collecting.
    pub max_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_user: None,
            api_password: None,
            player_backend: "mpd".to_string(),
            cache_ttl: Duration::seconds(DEFAULT_TTL_SECONDS as i64),
            excluded_substring: Some(DEFAULT_EXCLUDED_SUBSTRING.to_string()),
            request_timeout: StdDuration::from_secs(10),
            playback_timeout: StdDuration::from_secs(60),
            max_depth: 64,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_user", &self.api_user)
            .field("api_password", &self.api_password.as_ref().map(|_| "***"))
            .field("player_backend", &self.player_backend)
            .field("cache_ttl", &format_duration(self.cache_ttl))
            .field("excluded_substring", &self.excluded_substring)
            .field("request_timeout", &self.request_timeout)
            .field("playback_timeout", &self.playback_timeout)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Settings {
    /// Resolve settings from an env file and the process environment.
    ///
    /// With `env_file = None`, `./.env` is read if present. An explicit
    /// path must exist.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        let mut vars = match env_file {
            Some(path) => load_env_file(path)?,
            None => load_env_file_optional(Path::new(".env"))?,
        };

        vars.extend(std::env::vars().filter(|(k, _)| k.starts_with("ROMPR_")));

        let settings = Self::default().with_vars(&vars)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay values from a variable map onto these settings.
    pub fn with_vars(mut self, vars: &HashMap<String, String>) -> Result<Self> {
        if let Some(url) = vars.get(ENV_API_URL) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(user) = vars.get(ENV_API_USER) {
            self.api_user = Some(user.clone()).filter(|u| !u.is_empty());
        }
        if let Some(password) = vars.get(ENV_API_PASSWORD) {
            self.api_password = Some(password.clone());
        }
        if let Some(backend) = vars.get(ENV_PLAYER_BACKEND) {
            self.player_backend = backend.clone();
        }
        if let Some(ttl) = vars.get(ENV_CACHE_TTL) {
            self.cache_ttl = parse_ttl(ttl)?;
        }
        if let Some(excluded) = vars.get(ENV_SKIP_SUBSTRING) {
            self.excluded_substring = Some(excluded.clone()).filter(|s| !s.is_empty());
        }
        if let Some(timeout) = vars.get(ENV_REQUEST_TIMEOUT) {
            self.request_timeout = parse_timeout(ENV_REQUEST_TIMEOUT, timeout)?;
        }
        if let Some(timeout) = vars.get(ENV_PLAYBACK_TIMEOUT) {
            self.playback_timeout = parse_timeout(ENV_PLAYBACK_TIMEOUT, timeout)?;
        }
        if let Some(depth) = vars.get(ENV_MAX_DEPTH) {
            self.max_depth = depth.trim().parse().map_err(|_| {
                RemoteError::ConfigValidationError {
                    message: format!("{} must be a whole number, got '{}'", ENV_MAX_DEPTH, depth),
                }
            })?;
        }

        Ok(self)
    }

    /// Check that the resolved values are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(RemoteError::ConfigValidationError {
                message: format!("{} must be an http(s) URL, got '{}'", ENV_API_URL, self.base_url),
            });
        }
        if self.cache_ttl < Duration::zero() {
            return Err(RemoteError::ConfigValidationError {
                message: format!("{} must not be negative", ENV_CACHE_TTL),
            });
        }
        if self.request_timeout.is_zero() || self.playback_timeout.is_zero() {
            return Err(RemoteError::ConfigValidationError {
                message: "Timeouts must be greater than zero".to_string(),
            });
        }
        if self.max_depth == 0 {
            return Err(RemoteError::ConfigValidationError {
                message: format!("{} must be at least 1", ENV_MAX_DEPTH),
            });
        }
        Ok(())
    }
}

fn parse_timeout(name: &str, value: &str) -> Result<StdDuration> {
    parse_ttl(value)?
        .to_std()
        .map_err(|_| RemoteError::ConfigValidationError {
            message: format!("{} must not be negative", name),
        })
}
