use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/perpetual/config.toml` or `~/.config/perpetual/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PERPETUAL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the playhead is checked against the loop end (milliseconds).
    pub poll_interval_ms: u64,
    /// Loop count at which the counter freezes and shows as infinite.
    pub loop_infinite_count: u32,
    /// Consecutive failed polls tolerated before playback is stopped.
    pub max_tick_failures: u32,
    /// Start playing as soon as the track is loaded.
    pub autoplay: bool,
    /// Output volume, `0.0` to `1.0`. Carried over when another file is opened.
    pub volume: f32,
}

impl PlaybackSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            loop_infinite_count: 99,
            max_tick_failures: 3,
            autoplay: false,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// How far `[` `]` `{` `}` move a loop bound (milliseconds).
    pub nudge_ms: u64,
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// How much `+` / `-` change the infinite-loop threshold.
    pub threshold_step: u32,
    /// How much `9` / `0` change the volume.
    pub volume_step: f32,
}

impl ControlsSettings {
    pub fn nudge(&self) -> Duration {
        Duration::from_millis(self.nudge_ms)
    }

    pub fn scrub(&self) -> Duration {
        Duration::from_secs(self.scrub_seconds)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            nudge_ms: 100,
            scrub_seconds: 5,
            threshold_step: 1,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Which track fields to show in the "now looping" line, and in what order.
    ///
    /// Example: ["artist", "title", "album"]
    pub track_fields: Vec<TrackDisplayField>,

    /// Separator used to join `track_fields`.
    pub track_separator: String,

    /// Show tenths of a second on loop bounds and position.
    pub show_tenths: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ round and round it goes ~ ".to_string(),
            track_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            track_separator: " - ".to_string(),
            show_tenths: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Write logs to a file (the terminal belongs to the UI).
    pub file: bool,
    /// Directory for the log file; defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: true,
            directory: None,
        }
    }
}
