//! The seams between the playback engine and whatever actually decodes audio.

use std::path::Path;
use std::time::Duration;

use crate::error::{AssetError, LoadError};

/// One opened audio file with its own output.
///
/// Every call must return quickly: the controller drives it from a
/// fixed-period poll on the main loop.
pub trait MediaAsset {
    /// Total playable length, when the decoder can tell.
    fn duration(&self) -> Option<Duration>;

    /// Current playback offset from the start of the file.
    fn position(&self) -> Result<Duration, AssetError>;

    /// Move the playhead. Does not change the play/pause state.
    fn seek(&mut self, to: Duration) -> Result<(), AssetError>;

    /// Start or resume output.
    fn play(&mut self);

    /// Pause output, keeping the current position.
    fn pause(&mut self);

    /// Output gain, `0.0` silent to `1.0` full.
    fn set_volume(&mut self, volume: f32);
}

/// Opens media assets by location.
pub trait AssetLoader {
    type Asset: MediaAsset;

    fn load(&self, location: &Path) -> Result<Self::Asset, LoadError>;
}
