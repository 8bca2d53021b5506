//! Error types for player remote operations.
//!
//! This module defines [`RemoteError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Gateway variants cover everything that can go wrong talking to the
//!   player API; they are propagated unchanged and never retried
//! - The listing cache never produces errors
//! - Use `anyhow::Error` (via `RemoteError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for player remote operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The player API answered with a non-success status.
    #[error("Player API returned HTTP {status} for {url}")]
    GatewayStatus { url: String, status: u16 },

    /// The player API could not be reached or its response could not be read.
    #[error("Failed to reach player API at {url}: {source}")]
    GatewayTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A directory listing did not have the expected markup.
    #[error("Unexpected listing markup from {url}: {message}")]
    GatewayMarkup { url: String, message: String },

    /// A skip pattern is not a valid regular expression.
    #[error("Invalid skip pattern '{pattern}': {source}")]
    InvalidSkipPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Directory recursion went deeper than the configured bound.
    #[error("Directory tree under '{path}' is deeper than {max_depth} levels")]
    TreeTooDeep { path: String, max_depth: usize },

    /// Settings file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid settings values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Tool name not part of the exposed surface.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// Tool arguments did not match the tool's signature.
    #[error("Invalid tool arguments: {message}")]
    InvalidToolArguments { message: String },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RemoteError {
    /// Whether this error originated in the player gateway.
    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            RemoteError::GatewayStatus { .. }
                | RemoteError::GatewayTransport { .. }
                | RemoteError::GatewayMarkup { .. }
        )
    }
}

/// Result type alias for player remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
