//! Settings for reaching the player and sizing the listing cache.
//!
//! - Dotenv parsing in [`env_file`]
//! - Layered resolution and validation in [`settings`]
//! - Duration strings (`7d`, `24h`, ...) in [`ttl`]
//!
//! # Example
//!
//! ```
//! use rompr_remote::config::Settings;
//! use std::collections::HashMap;
//!
//! let mut vars = HashMap::new();
//! vars.insert("ROMPR_API_URL".to_string(), "https://media.example.com/api".to_string());
//! vars.insert("ROMPR_CACHE_TTL".to_string(), "1d".to_string());
//!
//! let settings = Settings::default().with_vars(&vars).unwrap();
//! settings.validate().unwrap();
//! assert_eq!(settings.cache_ttl.num_hours(), 24);
//! ```

pub mod env_file;
pub mod settings;
pub mod ttl;

pub use env_file::{load_env_file, load_env_file_optional, parse_env};
pub use settings::{
    Settings, DEFAULT_API_URL, ENV_API_PASSWORD, ENV_API_URL, ENV_API_USER, ENV_CACHE_TTL,
    ENV_MAX_DEPTH, ENV_PLAYBACK_TIMEOUT, ENV_PLAYER_BACKEND, ENV_REQUEST_TIMEOUT,
    ENV_SKIP_SUBSTRING,
};
pub use ttl::{format_duration, parse_ttl};
