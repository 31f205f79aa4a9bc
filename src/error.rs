//! Error types shared by the media backend, the track model and the
//! playback controller.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to turn a location into a playable track.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The file could not be opened at all.
    #[error("cannot open {}: {reason}", path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    /// The file opened but no decoder could make sense of it, or its length
    /// could not be determined.
    #[error("unsupported audio format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// A loop range that cannot be applied as requested.
///
/// Never surfaced to callers: the track clamps instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("loop start {start:?} is not before loop end {end:?}")]
    InvertedBounds { start: Duration, end: Duration },
}

/// Errors reported by the playback controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The operation needs a loaded track.
    #[error("no track loaded")]
    NoTrackLoaded,

    /// The media asset kept failing to report or change its position.
    #[error("audio output stopped responding after {failures} attempts")]
    AssetUnresponsive { failures: u32 },
}

/// A single failed request to a media asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("seek failed: {0}")]
    Seek(String),

    #[error("position unavailable: {0}")]
    Position(String),
}
