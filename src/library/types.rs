//! Directory listing types.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A playable file. Identity is `path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct File {
    /// Library-relative path, e.g. `Artist/Album/01.mp3`.
    pub path: String,
    /// Display title.
    pub title: String,
    /// Duration as displayed by the player, e.g. `3:45`.
    pub duration: String,
}

/// A subdirectory. Identity is `path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Folder {
    /// Library-relative path, e.g. `Artist/Album`.
    pub path: String,
    /// Display title.
    pub title: String,
}

/// The immediate contents of one library path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub files: Vec<File>,
    pub folders: Vec<Folder>,
}

impl File {
    /// Create a file entry.
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            duration: duration.into(),
        }
    }

    fn decoded(self) -> Self {
        Self {
            path: decode_path(&self.path),
            title: decode_path(&self.title),
            duration: self.duration,
        }
    }
}

impl Folder {
    /// Create a folder entry.
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }

    fn decoded(self) -> Self {
        Self {
            path: decode_path(&self.path),
            title: decode_path(&self.title),
        }
    }
}

impl Directory {
    /// Whether the listing has neither files nor folders.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Percent-decode every path and title in the listing.
    ///
    /// Listings arrive encoded from the player API; everything downstream
    /// (skip matching, sorting, `add` commands) works on decoded paths.
    pub fn decoded(self) -> Self {
        Self {
            files: self.files.into_iter().map(File::decoded).collect(),
            folders: self.folders.into_iter().map(Folder::decoded).collect(),
        }
    }
}

/// Percent-decode a path.
///
/// Sequences that do not decode to valid UTF-8 leave the input untouched.
pub fn decode_path(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_path_handles_escapes() {
        assert_eq!(
            decode_path("Sigur%20R%C3%B3s/Takk/01%20Takk.mp3"),
            "Sigur Rós/Takk/01 Takk.mp3"
        );
    }

    #[test]
    fn decode_path_leaves_plain_paths() {
        assert_eq!(decode_path("Artist/Album/01.mp3"), "Artist/Album/01.mp3");
    }

    #[test]
    fn decode_path_keeps_invalid_utf8_raw() {
        assert_eq!(decode_path("bad%FF.mp3"), "bad%FF.mp3");
    }

    #[test]
    fn directory_decoded_decodes_files_and_folders() {
        let dir = Directory {
            files: vec![File::new("A%20B/01.mp3", "One%20Two", "3:00")],
            folders: vec![Folder::new("A%20B/Live", "Live%21")],
        };

        let decoded = dir.decoded();

        assert_eq!(decoded.files[0].path, "A B/01.mp3");
        assert_eq!(decoded.files[0].title, "One Two");
        assert_eq!(decoded.files[0].duration, "3:00");
        assert_eq!(decoded.folders[0].path, "A B/Live");
        assert_eq!(decoded.folders[0].title, "Live!");
    }

    #[test]
    fn empty_directory_is_empty() {
        assert!(Directory::default().is_empty());
        let dir = Directory {
            files: vec![File::new("a.mp3", "a", "1:00")],
            folders: vec![],
        };
        assert!(!dir.is_empty());
    }

    #[test]
    fn directory_serializes_with_field_names() {
        let dir = Directory {
            files: vec![File::new("a.mp3", "A", "1:00")],
            folders: vec![Folder::new("sub", "Sub")],
        };
        let json = serde_json::to_value(&dir).unwrap();
        assert_eq!(json["files"][0]["path"], "a.mp3");
        assert_eq!(json["files"][0]["duration"], "1:00");
        assert_eq!(json["folders"][0]["title"], "Sub");
    }
}
