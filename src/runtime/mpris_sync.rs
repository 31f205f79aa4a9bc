use crate::app::App;
use crate::mpris::MprisHandle;
use crate::playback::PlayerEvent;

/// Forward what MPRIS cares about after `app` has absorbed `event`.
pub fn update_mpris(mpris: &MprisHandle, app: &App, event: &PlayerEvent) {
    match event {
        PlayerEvent::TrackLoaded(_) => {
            mpris.set_track_metadata(app.track.as_ref());
            mpris.set_playback(app.playback);
        }
        PlayerEvent::PlaybackStarted
        | PlayerEvent::PlaybackPaused
        | PlayerEvent::PlaybackStopped => mpris.set_playback(app.playback),
        _ => {}
    }
}
