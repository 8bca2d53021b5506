//! Path skipping during recursive collection.
//!
//! A path is skipped when the optional user pattern matches it, or when it
//! contains the configured excluded substring. The same predicate applies to
//! directory paths and file paths.

use regex::Regex;

use crate::error::{RemoteError, Result};

/// Excluded substring applied when none is configured.
pub const DEFAULT_EXCLUDED_SUBSTRING: &str = "Audiobooks";

/// Compiled skip predicate.
///
/// # Example
///
/// ```
/// use rompr_remote::library::SkipRule;
///
/// let rule = SkipRule::new(Some("(?i)live"), Some("Audiobooks")).unwrap();
///
/// assert!(rule.should_skip("Artist/Live at Leeds"));
/// assert!(rule.should_skip("Audiobooks/Dune/01.mp3"));
/// assert!(!rule.should_skip("Artist/Studio/01.mp3"));
/// ```
#[derive(Debug, Clone)]
pub struct SkipRule {
    /// Raw pattern text, kept for cache keys.
    source: Option<String>,
    pattern: Option<Regex>,
    excluded: Option<String>,
}

impl SkipRule {
    /// Compile a skip rule.
    ///
    /// An empty `excluded` substring is treated as no exclusion.
    pub fn new(pattern: Option<&str>, excluded: Option<&str>) -> Result<Self> {
        let compiled = pattern
            .map(|p| {
                Regex::new(p).map_err(|source| RemoteError::InvalidSkipPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            source: pattern.map(String::from),
            pattern: compiled,
            excluded: excluded.filter(|s| !s.is_empty()).map(String::from),
        })
    }

    /// A rule that skips nothing.
    pub fn none() -> Self {
        Self {
            source: None,
            pattern: None,
            excluded: None,
        }
    }

    /// The raw pattern text, as supplied by the caller.
    pub fn pattern(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The excluded substring, if any.
    pub fn excluded(&self) -> Option<&str> {
        self.excluded.as_deref()
    }

    /// Whether `path` should be left out of a collection.
    pub fn should_skip(&self, path: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(path))
            || self.excluded.as_deref().is_some_and(|s| path.contains(s))
    }
}
