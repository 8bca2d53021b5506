//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{parse_ttl, Settings};
use crate::error::Result;
use crate::playback::PlaybackOptions;
use crate::tools::{
    BrowseArgs, CommandArgs, PlayRandomArgs, PlayTracksArgs, PlaylistArgs, ToolCall,
};

/// rompr-remote - Control a RompR music player from the command line.
#[derive(Debug, Parser)]
#[command(name = "rompr-remote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a .env file (overrides ./.env)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Player API base URL (overrides ROMPR_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Listing cache TTL, e.g. "7d", "12h", "900" (overrides ROMPR_CACHE_TTL)
    #[arg(long, global = true, value_name = "DURATION")]
    pub cache_ttl: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command-line overrides on top of resolved settings.
    pub fn apply_overrides(&self, mut settings: Settings) -> Result<Settings> {
        if let Some(url) = &self.base_url {
            settings.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(ttl) = &self.cache_ttl {
            settings.cache_ttl = parse_ttl(ttl)?;
        }
        settings.validate()?;
        Ok(settings)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Queue random tracks from a library folder
    PlayRandom(PlayRandomCliArgs),

    /// Queue specific tracks
    Play(PlayCliArgs),

    /// List folders in the library
    Browse(BrowseCliArgs),

    /// Show player status
    Status,

    /// Run raw player commands
    Command(CommandCliArgs),

    /// Show the current play queue
    Playlist(PlaylistCliArgs),

    /// Invoke a tool by name with JSON arguments
    Call(CallArgs),

    /// Answer JSON tool calls read line by line from stdin
    Serve,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Flags shared by the playback subcommands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct QueueFlags {
    /// Append to the queue instead of replacing it
    #[arg(long)]
    pub no_clear: bool,

    /// Do not start playback after queueing
    #[arg(long)]
    pub no_play: bool,
}

impl QueueFlags {
    pub fn options(&self) -> PlaybackOptions {
        PlaybackOptions {
            clear_first: !self.no_clear,
            start_playing: !self.no_play,
        }
    }
}

/// Arguments for the `play-random` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PlayRandomCliArgs {
    /// Library folder to draw from (default: the whole library)
    pub path: Option<String>,

    /// Number of tracks to queue
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Regex; matching folders and files are left out
    #[arg(long, value_name = "REGEX")]
    pub skip: Option<String>,

    #[command(flatten)]
    pub queue: QueueFlags,
}

/// Arguments for the `play` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PlayCliArgs {
    /// Track paths, queued in the given order
    #[arg(required = true)]
    pub tracks: Vec<String>,

    #[command(flatten)]
    pub queue: QueueFlags,
}

/// Arguments for the `browse` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BrowseCliArgs {
    /// Folders to list (default: the library root)
    pub paths: Vec<String>,
}

/// Arguments for the `command` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CommandCliArgs {
    /// Commands, one per argument, words separated by spaces (e.g. "setvol 40")
    #[arg(required = true)]
    pub commands: Vec<String>,
}

/// Arguments for the `playlist` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlaylistCliArgs {
    /// Track attributes to include (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Arguments for the `call` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CallArgs {
    /// Tool name, e.g. playRandomTracks
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(default_value = "{}")]
    pub arguments: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl Commands {
    /// The tool call this subcommand stands for, if any.
    ///
    /// `serve` and `completions` are not tool calls.
    pub fn tool_call(&self) -> Result<Option<ToolCall>> {
        let call = match self {
            Commands::PlayRandom(args) => {
                let options = args.queue.options();
                ToolCall::PlayRandomTracks(PlayRandomArgs {
                    path: args.path.clone().unwrap_or_default(),
                    count: args.count,
                    clear_first: options.clear_first,
                    start_playing: options.start_playing,
                    skip_pattern: args.skip.clone(),
                })
            }
            Commands::Play(args) => {
                let options = args.queue.options();
                ToolCall::PlayTracks(PlayTracksArgs {
                    tracks: args.tracks.clone(),
                    clear_first: options.clear_first,
                    start_playing: options.start_playing,
                })
            }
            Commands::Browse(args) => ToolCall::BrowseDirectory(BrowseArgs {
                paths: args.paths.clone(),
            }),
            Commands::Status => ToolCall::GetStatus,
            Commands::Command(args) => ToolCall::RunPlayerCommand(CommandArgs {
                commands: args
                    .commands
                    .iter()
                    .map(|c| c.split_whitespace().map(str::to_string).collect())
                    .collect(),
            }),
            Commands::Playlist(args) => ToolCall::GetPlaylist(PlaylistArgs {
                fields: (!args.fields.is_empty()).then(|| args.fields.clone()),
            }),
            Commands::Call(args) => {
                let arguments = serde_json::from_str(&args.arguments)?;
                ToolCall::parse(&args.tool, arguments)?
            }
            Commands::Serve | Commands::Completions(_) => return Ok(None),
        };
        Ok(Some(call))
    }
}
