//! Duration strings for TTLs and timeouts.

use chrono::Duration;

use crate::error::{RemoteError, Result};

/// Parse a TTL string like "7d", "24h", "30m", "45s", or bare seconds.
pub fn parse_ttl(ttl: &str) -> Result<Duration> {
    let ttl = ttl.trim().to_lowercase();

    let (digits, unit) = match ttl.char_indices().last() {
        Some((i, c)) if c.is_ascii_alphabetic() => (&ttl[..i], c),
        _ => (ttl.as_str(), 's'),
    };

    let n: i64 = digits
        .trim()
        .parse()
        .map_err(|_| RemoteError::ConfigValidationError {
            message: format!("Invalid duration '{}'", ttl),
        })?;

    let duration = match unit {
        'd' => Duration::try_days(n),
        'h' => Duration::try_hours(n),
        'm' => Duration::try_minutes(n),
        's' => Duration::try_seconds(n),
        other => {
            return Err(RemoteError::ConfigValidationError {
                message: format!("Unknown duration unit '{}' in '{}'", other, ttl),
            })
        }
    };

    duration.ok_or_else(|| RemoteError::ConfigValidationError {
        message: format!("Duration '{}' is out of range", ttl),
    })
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();

    if secs >= 86400 && secs % 86400 == 0 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}
