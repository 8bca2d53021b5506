//! Directory-browser markup scraping.
//!
//! The player's directory browser answers with an HTML fragment. Tracks are
//! elements classed `clicktrack` whose `name` attribute holds the track path;
//! folders are elements classed `clickalbum` carrying a hidden `dirpath`
//! input. Both have an `expand` child with the display title, and tracks a
//! `tracktime` child with the duration.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::library::{Directory, File, Folder};

// Quoted attribute values may contain '>'.
static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([a-zA-Z][a-zA-Z0-9]*)\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).unwrap()
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .unwrap()
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"</?[a-zA-Z!](?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

const TRACK_CLASS: &str = "clicktrack";
const FOLDER_CLASS: &str = "clickalbum";
const TITLE_CLASS: &str = "expand";
const DURATION_CLASS: &str = "tracktime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    Track,
    Folder,
}

struct Tag<'a> {
    name: &'a str,
    attrs: HashMap<String, String>,
    start: usize,
    end: usize,
}

impl Tag<'_> {
    fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }
}

/// Parse a directory-browser fragment into a listing.
///
/// Returns an error message naming the offending item when a track has no
/// path or a folder has no `dirpath`.
///
/// # Example
///
/// ```
/// use rompr_remote::gateway::parse_directory;
///
/// let html = r#"
/// <div class="clickalbum" name="x"><input type="hidden" name="dirpath" value="Artist%2FAlbum" />
///   <div class="expand">Album</div></div>
/// <div class="clicktrack playable" name="Artist%2F01.mp3">
///   <div class="expand">Intro</div><div class="tracktime">1:02</div></div>
/// "#;
///
/// let dir = parse_directory(html).unwrap();
/// assert_eq!(dir.folders[0].path, "Artist%2FAlbum");
/// assert_eq!(dir.files[0].title, "Intro");
/// assert_eq!(dir.files[0].duration, "1:02");
/// ```
pub fn parse_directory(html: &str) -> Result<Directory, String> {
    let tags = open_tags(html);

    let items: Vec<(usize, ItemKind)> = tags
        .iter()
        .enumerate()
        .filter_map(|(i, tag)| {
            if tag.has_class(TRACK_CLASS) {
                Some((i, ItemKind::Track))
            } else if tag.has_class(FOLDER_CLASS) {
                Some((i, ItemKind::Folder))
            } else {
                None
            }
        })
        .collect();

    let mut directory = Directory::default();

    for (n, &(index, kind)) in items.iter().enumerate() {
        let item = &tags[index];
        // Children run until the next track or folder starts.
        let limit = items
            .get(n + 1)
            .map(|&(next, _)| tags[next].start)
            .unwrap_or(html.len());
        let children: Vec<&Tag> = tags[index + 1..]
            .iter()
            .take_while(|t| t.start < limit)
            .collect();

        let title = child_text(html, &children, TITLE_CLASS).unwrap_or_default();

        match kind {
            ItemKind::Track => {
                let path = item
                    .attrs
                    .get("name")
                    .ok_or_else(|| format!("track '{}' has no name attribute", title))?;
                let duration = child_text(html, &children, DURATION_CLASS).unwrap_or_default();
                directory.files.push(File::new(path.clone(), title, duration));
            }
            ItemKind::Folder => {
                let path = children
                    .iter()
                    .find(|t| {
                        t.name.eq_ignore_ascii_case("input")
                            && t.attrs.get("name").map(String::as_str) == Some("dirpath")
                    })
                    .and_then(|t| t.attrs.get("value"))
                    .ok_or_else(|| format!("folder '{}' has no dirpath input", title))?;
                directory.folders.push(Folder::new(path.clone(), title));
            }
        }
    }

    Ok(directory)
}

fn open_tags(html: &str) -> Vec<Tag<'_>> {
    OPEN_TAG
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            Some(Tag {
                name: caps.get(1)?.as_str(),
                attrs: parse_attributes(attrs),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

fn parse_attributes(raw: &str) -> HashMap<String, String> {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            (caps[1].to_ascii_lowercase(), unescape(value))
        })
        .collect()
}

/// Text content of the first child carrying `class`, tags stripped.
fn child_text(html: &str, children: &[&Tag], class: &str) -> Option<String> {
    let tag = children.iter().find(|t| t.has_class(class))?;
    let inner = inner_html(html, tag);
    let text = ANY_TAG.replace_all(inner, "");
    Some(unescape(text.trim()))
}

/// Markup between `tag` and its matching close tag.
fn inner_html<'a>(html: &'a str, tag: &Tag) -> &'a str {
    let rest = &html[tag.end..];
    let open = format!("<{}", tag.name.to_ascii_lowercase());
    let close = format!("</{}", tag.name.to_ascii_lowercase());
    let lower = rest.to_ascii_lowercase();

    let mut depth = 0usize;
    let mut pos = 0usize;

    while pos < lower.len() {
        let Some(offset) = lower[pos..].find('<') else {
            break;
        };
        let at = pos + offset;
        if lower[at..].starts_with(&close) {
            if depth == 0 {
                return &rest[..at];
            }
            depth -= 1;
        } else if lower[at..].starts_with(&open)
            && lower[at + open.len()..]
                .chars()
                .next()
                .is_some_and(|c| c == '>' || c.is_whitespace() || c == '/')
        {
            depth += 1;
        }
        pos = at + 1;
    }

    rest
}

/// Replace HTML character references.
fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_gt_in_attribute_does_not_end_tag() {
        let html = r#"
<div class="clicktrack playable" name="Artist%2F1 > 2.mp3" title='a > b'>
  <div class="expand">One <span data-x="&gt;" class="sub">></span> Two</div>
  <div class="tracktime">2:22</div>
</div>"#;

        let dir = parse_directory(html).unwrap();

        assert_eq!(dir.files.len(), 1);
        assert_eq!(dir.files[0].path, "Artist%2F1 > 2.mp3");
        assert_eq!(dir.files[0].title, "One > Two");
        assert_eq!(dir.files[0].duration, "2:22");
    }

    const LISTING: &str = r#"
<div class="menuitem containerbox clickalbum" name="aalbum1">
  <i class="icon-folder-open-empty fixed"></i>
  <input type="hidden" name="dirpath" value="Artist%2FAlbum%20One" />
  <div class="expand">Album One</div>
</div>
<div class="clicktrack playable draggable indent containerbox" name="Artist%2FTrack%201.mp3">
  <i class="icon-music fixed"></i>
  <div class="expand">Track <b>1</b> &amp; More</div>
  <div class="tracktime">3:45</div>
</div>
<div class="clicktrack playable" name='Artist%2FTrack%202.mp3'>
  <div class="expand">Track 2</div>
  <div class="tracktime">4:01</div>
</div>
"#;

    #[test]
    fn parses_tracks_and_folders() {
        let dir = parse_directory(LISTING).unwrap();

        assert_eq!(dir.folders.len(), 1);
        assert_eq!(dir.folders[0].path, "Artist%2FAlbum%20One");
        assert_eq!(dir.folders[0].title, "Album One");

        assert_eq!(dir.files.len(), 2);
        assert_eq!(dir.files[0].path, "Artist%2FTrack%201.mp3");
        assert_eq!(dir.files[0].title, "Track 1 & More");
        assert_eq!(dir.files[0].duration, "3:45");
        assert_eq!(dir.files[1].path, "Artist%2FTrack%202.mp3");
        assert_eq!(dir.files[1].duration, "4:01");
    }

    #[test]
    fn empty_markup_is_empty_directory() {
        assert!(parse_directory("").unwrap().is_empty());
        assert!(parse_directory("<div class=\"nothing\"></div>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn class_must_match_whole_token() {
        let html = r#"<div class="clicktracker" name="x"></div>"#;
        assert!(parse_directory(html).unwrap().is_empty());
    }

    #[test]
    fn track_without_name_is_an_error() {
        let html = r#"<div class="clicktrack"><div class="expand">Lost</div></div>"#;
        let err = parse_directory(html).unwrap_err();
        assert!(err.contains("Lost"));
    }

    #[test]
    fn folder_without_dirpath_is_an_error() {
        let html = r#"<div class="clickalbum"><div class="expand">Nowhere</div></div>"#;
        let err = parse_directory(html).unwrap_err();
        assert!(err.contains("Nowhere"));
    }

    #[test]
    fn missing_title_and_duration_default_to_empty() {
        let html = r#"<div class="clicktrack" name="a.mp3"></div>"#;
        let dir = parse_directory(html).unwrap();
        assert_eq!(dir.files[0].title, "");
        assert_eq!(dir.files[0].duration, "");
    }

    #[test]
    fn nested_same_tag_inside_title() {
        let html = r#"<div class="clicktrack" name="a.mp3"><div class="expand">Outer <div>inner</div> tail</div></div>"#;
        let dir = parse_directory(html).unwrap();
        assert_eq!(dir.files[0].title, "Outer inner tail");
    }

    #[test]
    fn unescape_handles_numeric_and_named_entities() {
        assert_eq!(unescape("Caf&#233; &#x2014; &lt;b&gt;"), "Café — <b>");
        assert_eq!(unescape("&unknown; stays"), "&unknown; stays");
    }

    #[test]
    fn attribute_values_are_unescaped() {
        let html = r#"<div class="clicktrack" name="Simon &amp; Garfunkel/01.mp3"></div>"#;
        let dir = parse_directory(html).unwrap();
        assert_eq!(dir.files[0].path, "Simon & Garfunkel/01.mp3");
    }
}
