//! `.env` file parsing.
//!
//! Credentials and the player URL usually live in a `.env` file next to
//! where the tools run. Lines are `KEY=value`, optionally prefixed with
//! `export`, with `#` comments and single or double quoted values.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{RemoteError, Result};

/// Parse dotenv-style content.
///
/// # Example
///
/// ```
/// use rompr_remote::config::parse_env;
/// use std::path::Path;
///
/// let content = r#"
/// ## Player API
/// ROMPR_API_URL=https://media.example.com/music/api
/// export ROMPR_API_USER="listener"
/// "#;
///
/// let vars = parse_env(content, Path::new(".env")).unwrap();
/// assert_eq!(vars["ROMPR_API_URL"], "https://media.example.com/music/api");
/// assert_eq!(vars["ROMPR_API_USER"], "listener");
/// ```
pub fn parse_env(content: &str, source: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);

        let Some((key, value)) = line.split_once('=') else {
            return Err(RemoteError::ConfigParseError {
                path: source.to_path_buf(),
                message: format!("Invalid line {}: {}", line_num + 1, line),
            });
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(RemoteError::ConfigParseError {
                path: source.to_path_buf(),
                message: format!("Missing key on line {}", line_num + 1),
            });
        }

        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    Ok(vars)
}

/// Load an env file, failing if it does not exist.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RemoteError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RemoteError::Io(e)
        }
    })?;

    parse_env(&content, path)
}

/// Load an env file if it exists, returning an empty map otherwise.
pub fn load_env_file_optional(path: &Path) -> Result<HashMap<String, String>> {
    if path.exists() {
        load_env_file(path)
    } else {
        Ok(HashMap::new())
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));

    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<HashMap<String, String>> {
        parse_env(content, Path::new(".env"))
    }

    #[test]
    fn parses_simple_env_file() {
        let vars = parse("KEY1=value1\nKEY2=value2\n").unwrap();

        assert_eq!(vars.get("KEY1"), Some(&"value1".to_string()));
        assert_eq!(vars.get("KEY2"), Some(&"value2".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = r#"
# Player
KEY=value

# Done
"#;
        let vars = parse(content).unwrap();

        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn handles_quoted_values() {
        let content = r#"
DOUBLE="double quoted"
SINGLE='single quoted'
UNQUOTED=no quotes
"#;
        let vars = parse(content).unwrap();

        assert_eq!(vars["DOUBLE"], "double quoted");
        assert_eq!(vars["SINGLE"], "single quoted");
        assert_eq!(vars["UNQUOTED"], "no quotes");
    }

    #[test]
    fn lone_quote_is_kept() {
        let vars = parse("Q=\"").unwrap();
        assert_eq!(vars["Q"], "\"");
    }

    #[test]
    fn handles_empty_values_and_equals_in_values() {
        let vars = parse("EMPTY=\nURL=https://example.com?a=b").unwrap();

        assert_eq!(vars["EMPTY"], "");
        assert_eq!(vars["URL"], "https://example.com?a=b");
    }

    #[test]
    fn strips_export_prefix() {
        let vars = parse("export ROMPR_API_USER=me").unwrap();
        assert_eq!(vars["ROMPR_API_USER"], "me");
    }

    #[test]
    fn rejects_lines_without_equals() {
        let err = parse("KEY=value\nnot a pair\n").unwrap_err();
        match err {
            RemoteError::ConfigParseError { message, .. } => {
                assert!(message.contains("line 2"));
            }
            other => panic!("expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_key() {
        assert!(parse("=value").is_err());
    }

    #[test]
    fn load_missing_file_is_config_not_found() {
        let err = load_env_file(Path::new("/nonexistent/path/.env")).unwrap_err();
        assert!(matches!(err, RemoteError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_optional_returns_empty_for_missing_file() {
        let vars = load_env_file_optional(Path::new("/nonexistent/path/.env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "ROMPR_CACHE_TTL=1h\n").unwrap();

        let vars = load_env_file(&path).unwrap();

        assert_eq!(vars["ROMPR_CACHE_TTL"], "1h");
    }
}
