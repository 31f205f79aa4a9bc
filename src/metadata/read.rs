use std::borrow::Cow;
use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use tracing::debug;

use super::cover::cover_data_uri;
use super::model::TrackMetadata;

/// Read title, artist, album, duration and cover art from `path`.
pub fn read(path: &Path) -> TrackMetadata {
    let mut meta = TrackMetadata::untagged(path);

    let tagged = match lofty::read_from_path(path) {
        Ok(tagged) => tagged,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable tags");
            return meta;
        }
    };

    let duration = tagged.properties().duration();
    if !duration.is_zero() {
        meta.duration = Some(duration);
    }

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(title) = non_empty(tag.title()) {
            meta.title = title;
        }
        meta.artist = non_empty(tag.artist());
        meta.album = non_empty(tag.album());
        meta.cover_art = cover_data_uri(tag.pictures());
    }

    meta
}

fn non_empty(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
