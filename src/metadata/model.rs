use std::path::Path;
use std::time::Duration;

/// Descriptive fields of a track, as read from its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Length according to the container, used when the decoder cannot tell.
    pub duration: Option<Duration>,
    /// Embedded cover art as a `data:` URI.
    pub cover_art: Option<String>,
}

impl TrackMetadata {
    /// Metadata for a file without usable tags: the file stem becomes the title.
    pub fn untagged(path: &Path) -> Self {
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();

        Self {
            title,
            ..Self::default()
        }
    }
}
