use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::audio::{AssetLoader, MediaAsset};
use crate::error::LoadError;
use crate::metadata::{self, TrackMetadata};

use super::range::LoopRange;

/// One opened audio file plus its loop range.
pub struct Track<A> {
    asset: A,
    source_location: PathBuf,
    duration: Duration,
    range: LoopRange,
    metadata: TrackMetadata,
}

/// Snapshot of a track handed to event subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub location: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub cover_art: Option<String>,
    pub duration: Duration,
    pub range: LoopRange,
}

impl TrackInfo {
    /// "Artist - Title", or just the title.
    pub fn display(&self) -> String {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{} - {}", a, self.title),
            _ => self.title.clone(),
        }
    }
}

impl<A: MediaAsset> Track<A> {
    /// Open `location` through `loader` and read its tags.
    ///
    /// The range starts out covering the whole file.
    pub fn open<L>(location: &Path, loader: &L) -> Result<Self, LoadError>
    where
        L: AssetLoader<Asset = A>,
    {
        let asset = loader.load(location)?;
        let metadata = metadata::read(location);

        let duration = asset
            .duration()
            .or(metadata.duration)
            .filter(|d| !d.is_zero())
            .ok_or_else(|| LoadError::UnsupportedFormat {
                path: location.to_path_buf(),
            })?;

        Ok(Self {
            asset,
            source_location: location.to_path_buf(),
            duration,
            range: LoopRange::full(duration),
            metadata,
        })
    }

    pub(crate) fn asset_mut(&mut self) -> &mut A {
        &mut self.asset
    }

    pub fn set_start_time(&mut self, t: Duration) -> LoopRange {
        self.range = self.range.with_start(t, self.duration);
        self.range
    }

    pub fn set_end_time(&mut self, t: Duration) -> LoopRange {
        self.range = self.range.with_end(t, self.duration);
        self.range
    }

    /// Replace both bounds. Inverted requests are clamped rather than refused.
    pub fn set_range(&mut self, start: Duration, end: Duration) -> LoopRange {
        self.range = match LoopRange::checked(start, end, self.duration) {
            Ok(range) => range,
            Err(e) => {
                let clamped = LoopRange::clamped(start, end, self.duration);
                debug!(error = %e, ?clamped, "clamped requested loop range");
                clamped
            }
        };
        self.range
    }

    /// Loop the whole file again.
    pub fn reset_range(&mut self) -> LoopRange {
        self.range = LoopRange::full(self.duration);
        self.range
    }

    pub fn info(&self) -> TrackInfo {
        TrackInfo {
            location: self.source_location.clone(),
            title: self.metadata.title.clone(),
            artist: self.metadata.artist.clone(),
            album: self.metadata.album.clone(),
            cover_art: self.metadata.cover_art.clone(),
            duration: self.duration,
            range: self.range,
        }
    }
}

impl<A> Track<A> {
    pub fn source_location(&self) -> &Path {
        &self.source_location
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn range(&self) -> LoopRange {
        self.range
    }

    pub fn start_time(&self) -> Duration {
        self.range.start
    }
}
