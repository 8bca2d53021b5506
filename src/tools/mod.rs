//! The callable tool surface.
//!
//! A [`ToolCall`] is one parsed invocation (`playRandomTracks`,
//! `playTracks`, `browseDirectory`, `getStatus`, `runPlayerCommand`,
//! `getPlaylist`); a [`Toolbox`] executes it against a gateway and returns
//! the result as JSON. One toolbox owns one listing cache, so repeated
//! calls through the same toolbox share cached subtrees.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::error::{RemoteError, Result};
use crate::gateway::{PlayerCommand, PlayerGateway, QueueTrack, Status};
use crate::library::Directory;
use crate::playback::{Orchestrator, PlaybackOptions};

/// Track attributes returned by `getPlaylist` when no fields are given.
pub const SONG_ATTRIBUTES: &[&str] = &[
    "file",
    "folder",
    "Title",
    "Album",
    "Artist",
    "Track",
    "Date",
    "Genre",
    "Playcount",
    "Id",
    "Pos",
    "albumartist",
    "trackartist",
    "lastplayed",
    "metadata",
    "duration",
];

/// Every tool name [`ToolCall::parse`] accepts.
pub const TOOL_NAMES: &[&str] = &[
    "playRandomTracks",
    "playTracks",
    "browseDirectory",
    "getStatus",
    "runPlayerCommand",
    "getPlaylist",
];

const DEFAULT_RANDOM_COUNT: usize = 20;

fn default_count() -> usize {
    DEFAULT_RANDOM_COUNT
}

fn default_true() -> bool {
    true
}

/// Arguments of `playRandomTracks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayRandomArgs {
    pub path: String,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_true")]
    pub clear_first: bool,
    #[serde(default = "default_true")]
    pub start_playing: bool,
    #[serde(default)]
    pub skip_pattern: Option<String>,
}

/// Arguments of `playTracks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayTracksArgs {
    pub tracks: Vec<String>,
    #[serde(default = "default_true")]
    pub clear_first: bool,
    #[serde(default = "default_true")]
    pub start_playing: bool,
}

/// Arguments of `browseDirectory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrowseArgs {
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Arguments of `runPlayerCommand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandArgs {
    pub commands: Vec<PlayerCommand>,
}

/// Arguments of `getPlaylist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaylistArgs {
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// One tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    PlayRandomTracks(PlayRandomArgs),
    PlayTracks(PlayTracksArgs),
    BrowseDirectory(BrowseArgs),
    GetStatus,
    RunPlayerCommand(CommandArgs),
    GetPlaylist(PlaylistArgs),
}

impl ToolCall {
    /// Parse a call from a tool name and its JSON arguments.
    ///
    /// Missing or `null` arguments are treated as `{}`.
    ///
    /// # Example
    ///
    /// ```
    /// use rompr_remote::tools::ToolCall;
    /// use serde_json::json;
    ///
    /// let call = ToolCall::parse("playRandomTracks", json!({"path": "Jazz"})).unwrap();
    /// match call {
    ///     ToolCall::PlayRandomTracks(args) => {
    ///         assert_eq!(args.count, 20);
    ///         assert!(args.clear_first);
    ///     }
    ///     other => panic!("unexpected {:?}", other),
    /// }
    /// ```
    pub fn parse(name: &str, arguments: Value) -> Result<Self> {
        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        match name {
            "playRandomTracks" => Ok(Self::PlayRandomTracks(arguments_as(name, arguments)?)),
            "playTracks" => Ok(Self::PlayTracks(arguments_as(name, arguments)?)),
            "browseDirectory" => Ok(Self::BrowseDirectory(arguments_as(name, arguments)?)),
            "getStatus" => {
                let _: Map<String, Value> = arguments_as(name, arguments)?;
                Ok(Self::GetStatus)
            }
            "runPlayerCommand" => Ok(Self::RunPlayerCommand(arguments_as(name, arguments)?)),
            "getPlaylist" => Ok(Self::GetPlaylist(arguments_as(name, arguments)?)),
            _ => Err(RemoteError::UnknownTool {
                name: name.to_string(),
            }),
        }
    }

    /// Parse a call from `{"tool": "...", "arguments": {...}}`.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(RemoteError::InvalidToolArguments {
                message: "tool call must be a JSON object".to_string(),
            });
        };

        let name = match object.remove("tool") {
            Some(Value::String(name)) => name,
            _ => {
                return Err(RemoteError::InvalidToolArguments {
                    message: "tool call is missing a string 'tool' field".to_string(),
                })
            }
        };

        Self::parse(&name, object.remove("arguments").unwrap_or(Value::Null))
    }

    /// The wire name of this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayRandomTracks(_) => "playRandomTracks",
            Self::PlayTracks(_) => "playTracks",
            Self::BrowseDirectory(_) => "browseDirectory",
            Self::GetStatus => "getStatus",
            Self::RunPlayerCommand(_) => "runPlayerCommand",
            Self::GetPlaylist(_) => "getPlaylist",
        }
    }
}

fn arguments_as<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| RemoteError::InvalidToolArguments {
        message: format!("{}: {}", tool, e),
    })
}

/// Executes tool calls against one gateway and one listing cache.
pub struct Toolbox<G: ?Sized> {
    gateway: Arc<G>,
    orchestrator: Orchestrator<G>,
}

impl<G: PlayerGateway + ?Sized> Toolbox<G> {
    /// Create a toolbox around an orchestrator sharing `gateway`.
    pub fn new(gateway: Arc<G>, orchestrator: Orchestrator<G>) -> Self {
        Self {
            gateway,
            orchestrator,
        }
    }

    /// Create a toolbox with a fresh cache configured from `settings`.
    pub fn from_settings(gateway: Arc<G>, settings: &Settings) -> Self {
        let orchestrator = Orchestrator::from_settings(gateway.clone(), settings);
        Self::new(gateway, orchestrator)
    }

    /// The orchestrator behind the playback tools, and through it the cache.
    pub fn orchestrator(&self) -> &Orchestrator<G> {
        &self.orchestrator
    }

    /// Execute `call` and return its result as JSON.
    pub async fn call(&self, call: ToolCall) -> Result<Value> {
        tracing::debug!("Tool call: {}", call.name());

        match call {
            ToolCall::PlayRandomTracks(args) => {
                let options = PlaybackOptions {
                    clear_first: args.clear_first,
                    start_playing: args.start_playing,
                };
                self.orchestrator
                    .play_random(&args.path, args.count, options, args.skip_pattern.as_deref())
                    .await
            }
            ToolCall::PlayTracks(args) => {
                let options = PlaybackOptions {
                    clear_first: args.clear_first,
                    start_playing: args.start_playing,
                };
                self.orchestrator.play_tracks(&args.tracks, options).await
            }
            ToolCall::BrowseDirectory(args) => {
                let listings = self.browse_directory(&args.paths).await?;
                Ok(serde_json::to_value(listings)?)
            }
            ToolCall::GetStatus => self.get_status().await,
            ToolCall::RunPlayerCommand(args) => self.gateway.run_commands(&args.commands).await,
            ToolCall::GetPlaylist(args) => {
                let tracks = self.get_playlist(args.fields.as_deref()).await?;
                Ok(Value::Array(tracks.into_iter().map(Value::Object).collect()))
            }
        }
    }

    /// List each of `paths` once, decoded. An empty list browses the root.
    pub async fn browse_directory(&self, paths: &[String]) -> Result<BTreeMap<String, Directory>> {
        let root = [String::new()];
        let paths = if paths.is_empty() { &root[..] } else { paths };

        let mut listings = BTreeMap::new();
        for path in paths {
            let directory = self.gateway.fetch_directory(path).await?.decoded();
            listings.insert(path.clone(), directory);
        }
        Ok(listings)
    }

    /// Current player status.
    pub async fn get_status(&self) -> Result<Status> {
        self.gateway.run_commands(&[vec!["status".to_string()]]).await
    }

    /// The play queue, each track reduced to `fields` (or [`SONG_ATTRIBUTES`]).
    pub async fn get_playlist(&self, fields: Option<&[String]>) -> Result<Vec<QueueTrack>> {
        let tracks = self.gateway.fetch_tracklist().await?;
        Ok(tracks
            .into_iter()
            .map(|track| match fields {
                Some(fields) => pick_fields(track, fields.iter().map(String::as_str)),
                None => pick_fields(track, SONG_ATTRIBUTES.iter().copied()),
            })
            .collect())
    }
}

fn pick_fields<'a>(mut track: QueueTrack, fields: impl Iterator<Item = &'a str>) -> QueueTrack {
    fields
        .filter_map(|field| track.remove(field).map(|value| (field.to_string(), value)))
        .collect()
}
