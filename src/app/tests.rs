use super::*;
use crate::error::{LoadError, PlaybackError};
use std::path::PathBuf;
use crate::playback::{PlaybackState, PlayerEvent};
use crate::track::{LoopRange, TrackInfo};
use std::time::Duration;

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn info() -> TrackInfo {
    TrackInfo {
        location: PathBuf::from("/music/etude.flac"),
        title: "Etude".into(),
        artist: Some("Someone".into()),
        album: None,
        cover_art: None,
        duration: secs(120.0),
        range: LoopRange::full(secs(120.0)),
    }
}

fn loaded() -> App {
    let mut app = App::new(99, 1.0);
    app.apply(&PlayerEvent::TrackLoaded(info()));
    app
}

#[test]
fn starts_empty() {
    let app = App::new(7, 1.0);
    assert!(app.track.is_none());
    assert_eq!(app.playback, PlaybackState::Idle);
    assert_eq!(app.loop_infinite_count, 7);
    assert_eq!(app.loop_progress(), 0.0);
}

#[test]
fn track_loaded_resets_view() {
    let mut app = loaded();
    app.apply(&PlayerEvent::LoopCountChanged {
        count: 4,
        infinite: false,
    });
    app.last_error = Some("old".into());

    app.apply(&PlayerEvent::TrackLoaded(info()));
    assert_eq!(app.playback, PlaybackState::Loaded);
    assert_eq!(app.loop_count, 0);
    assert_eq!(app.range, Some(LoopRange::full(secs(120.0))));
    assert_eq!(app.last_error, None);
    assert_eq!(app.track.as_ref().map(|t| t.title.as_str()), Some("Etude"));
}

#[test]
fn load_failure_keeps_current_track() {
    let mut app = loaded();
    app.apply(&PlayerEvent::LoadFailed(LoadError::UnsupportedFormat {
        path: "/tmp/x.txt".into(),
    }));
    assert!(app.track.is_some());
    assert!(app.last_error.as_deref().unwrap().contains("/tmp/x.txt"));
}

#[test]
fn transport_events_drive_state() {
    let mut app = loaded();
    app.apply(&PlayerEvent::PlaybackStarted);
    assert_eq!(app.playback, PlaybackState::Playing);
    app.apply(&PlayerEvent::PlaybackPaused);
    assert_eq!(app.playback, PlaybackState::Paused);
}

#[test]
fn stop_rewinds_and_clears_count() {
    let mut app = loaded();
    app.apply(&PlayerEvent::RangeChanged {
        start: secs(10.0),
        end: secs(20.0),
    });
    app.apply(&PlayerEvent::PlaybackStarted);
    app.apply(&PlayerEvent::PlaybackProgressed {
        position: secs(15.0),
    });
    app.apply(&PlayerEvent::LoopCountChanged {
        count: 2,
        infinite: false,
    });

    app.apply(&PlayerEvent::PlaybackStopped);
    assert_eq!(app.playback, PlaybackState::Loaded);
    assert_eq!(app.position, secs(10.0));
    assert_eq!(app.loop_count, 0);
}

#[test]
fn forced_stop_keeps_the_reason() {
    let mut app = loaded();
    app.apply(&PlayerEvent::PlaybackStarted);
    app.apply(&PlayerEvent::PlaybackFailed(
        PlaybackError::AssetUnresponsive { failures: 3 },
    ));
    app.apply(&PlayerEvent::PlaybackStopped);
    assert_eq!(app.playback, PlaybackState::Loaded);
    assert!(app.last_error.is_some());
}

#[test]
fn range_change_updates_track_snapshot() {
    let mut app = loaded();
    app.apply(&PlayerEvent::RangeChanged {
        start: secs(30.0),
        end: secs(45.5),
    });
    let expected = LoopRange {
        start: secs(30.0),
        end: secs(45.5),
    };
    assert_eq!(app.range, Some(expected));
    assert_eq!(app.track.unwrap().range, expected);
}

#[test]
fn loop_count_and_threshold() {
    let mut app = loaded();
    app.apply(&PlayerEvent::LoopCountChanged {
        count: 3,
        infinite: true,
    });
    assert!(app.infinite);

    app.set_loop_infinite_count(10);
    assert!(!app.infinite);
    app.set_loop_infinite_count(3);
    assert!(app.infinite);
}

#[test]
fn loop_progress_is_relative_to_range() {
    let mut app = loaded();
    app.apply(&PlayerEvent::RangeChanged {
        start: secs(10.0),
        end: secs(20.0),
    });
    app.apply(&PlayerEvent::PlaybackProgressed {
        position: secs(15.0),
    });
    assert!((app.loop_progress() - 0.5).abs() < 1e-9);

    app.apply(&PlayerEvent::PlaybackProgressed {
        position: secs(5.0),
    });
    assert_eq!(app.loop_progress(), 0.0);
}

#[test]
fn metadata_window_toggles() {
    let mut app = App::new(99, 1.0);
    app.toggle_metadata_window();
    assert!(app.metadata_window);
    app.toggle_metadata_window();
    assert!(!app.metadata_window);
}

#[test]
fn open_prompt_collects_a_trimmed_path() {
    let mut app = App::new(99, 1.0);
    assert!(!app.is_prompting());
    app.push_prompt_char('x');
    assert_eq!(app.open_prompt, None, "typing outside the prompt is ignored");

    app.enter_open_prompt();
    for c in " /tmp/b.wavv".chars() {
        app.push_prompt_char(c);
    }
    app.pop_prompt_char();
    assert!(app.is_prompting());
    assert_eq!(app.take_open_prompt().as_deref(), Some("/tmp/b.wav"));
    assert!(!app.is_prompting());
}

#[test]
fn blank_or_cancelled_prompt_yields_nothing() {
    let mut app = App::new(99, 1.0);
    app.enter_open_prompt();
    app.push_prompt_char(' ');
    assert_eq!(app.take_open_prompt(), None);

    app.enter_open_prompt();
    app.push_prompt_char('a');
    app.cancel_open_prompt();
    assert!(!app.is_prompting());
}
