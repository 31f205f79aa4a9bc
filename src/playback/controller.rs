use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{AssetLoader, MediaAsset};
use crate::config::PlaybackSettings;
use crate::error::{AssetError, LoadError, PlaybackError};
use crate::track::{LoopRange, Track};

use super::events::{EventBus, PlayerEvent};
use super::state::PlaybackState;
use super::timer::PollTimer;

/// Owns the current track and loops its range.
///
/// Every method runs on the caller's thread. While playing, the host loop
/// must call [`poll`](Self::poll) whenever [`next_tick_in`](Self::next_tick_in)
/// runs out.
pub struct PlaybackController<L: AssetLoader> {
    loader: L,
    track: Option<Track<L::Asset>>,
    state: PlaybackState,
    position: Duration,
    loop_count: u32,
    loop_infinite_count: u32,
    volume: f32,
    max_tick_failures: u32,
    consecutive_failures: u32,
    timer: PollTimer,
    bus: EventBus,
}

/// What a poll tick observed, decided before any state is touched.
enum TickOutcome {
    Progressed(Duration),
    Wrapped,
    Behind,
    Failed(AssetError),
}

impl<L: AssetLoader> PlaybackController<L> {
    pub fn new(loader: L, settings: &PlaybackSettings) -> Self {
        Self {
            loader,
            track: None,
            state: PlaybackState::Idle,
            position: Duration::ZERO,
            loop_count: 0,
            loop_infinite_count: settings.loop_infinite_count,
            volume: settings.volume.clamp(0.0, 1.0),
            max_tick_failures: settings.max_tick_failures.max(1),
            consecutive_failures: 0,
            timer: PollTimer::new(settings.poll_interval()),
            bus: EventBus::new(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        let rx = self.bus.subscribe();
        debug!(subscribers = self.bus.subscriber_count(), "event subscriber added");
        rx
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn track(&self) -> Option<&Track<L::Asset>> {
        self.track.as_ref()
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    pub fn loop_infinite_count(&self) -> u32 {
        self.loop_infinite_count
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// The counter has reached the threshold and no longer moves.
    pub fn is_infinite(&self) -> bool {
        self.loop_count >= self.loop_infinite_count
    }

    /// Replace the current track with the one at `location`.
    ///
    /// On failure the previous track, position and state are left as they were.
    pub fn open(&mut self, location: &Path) -> Result<(), LoadError> {
        let mut track = match Track::open(location, &self.loader) {
            Ok(track) => track,
            Err(e) => {
                warn!(error = %e, "failed to load track");
                self.bus.publish(PlayerEvent::LoadFailed(e.clone()));
                return Err(e);
            }
        };

        self.timer.cancel();
        if let Some(old) = self.track.as_mut() {
            old.asset_mut().pause();
        }
        track.asset_mut().set_volume(self.volume);

        info!(
            path = %track.source_location().display(),
            duration = ?track.duration(),
            "track loaded"
        );
        let info = track.info();
        self.position = track.start_time();
        self.track = Some(track);
        self.state = PlaybackState::Loaded;
        self.loop_count = 0;
        self.consecutive_failures = 0;
        self.bus.publish(PlayerEvent::TrackLoaded(info));
        Ok(())
    }

    /// Start from the loop start, or resume from where `pause` left off.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        let Some(track) = self.track.as_mut() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        if self.state == PlaybackState::Playing {
            return Ok(());
        }

        let asset = track.asset_mut();
        if let Err(e) = asset.seek(self.position) {
            warn!(error = %e, "could not position asset to start playback");
            return Err(PlaybackError::AssetUnresponsive { failures: 1 });
        }
        asset.play();

        self.state = PlaybackState::Playing;
        self.consecutive_failures = 0;
        self.timer.arm(Instant::now());

        info!(position = ?self.position, "playback started");
        self.bus.publish(PlayerEvent::PlaybackStarted);
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let Some(track) = self.track.as_mut() else {
            return;
        };

        self.timer.cancel();
        let asset = track.asset_mut();
        asset.pause();
        match asset.position() {
            Ok(p) => self.position = track.range().clamp(p),
            Err(e) => debug!(error = %e, "keeping last polled position"),
        }

        self.state = PlaybackState::Paused;
        info!(position = ?self.position, "playback paused");
        self.bus.publish(PlayerEvent::PlaybackPaused);
    }

    /// Play when not playing, pause otherwise.
    pub fn toggle(&mut self) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    pub fn stop(&mut self) {
        if !matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
            return;
        }
        self.halt();
        info!("playback stopped");
        self.bus.publish(PlayerEvent::PlaybackStopped);
    }

    /// Move the playhead inside the loop range without changing play/pause state.
    pub fn seek(&mut self, t: Duration) -> Result<(), PlaybackError> {
        let Some(track) = self.track.as_mut() else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        let target = track.range().clamp(t);
        if let Err(e) = track.asset_mut().seek(target) {
            warn!(error = %e, target = ?target, "seek failed");
            return Err(PlaybackError::AssetUnresponsive { failures: 1 });
        }
        self.position = target;
        self.bus
            .publish(PlayerEvent::PlaybackProgressed { position: target });
        Ok(())
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta: Duration, forward: bool) -> Result<(), PlaybackError> {
        let target = if forward {
            self.position.saturating_add(delta)
        } else {
            self.position.saturating_sub(delta)
        };
        self.seek(target)
    }

    pub fn set_loop_range(
        &mut self,
        start: Duration,
        end: Duration,
    ) -> Result<LoopRange, PlaybackError> {
        self.update_range(|track| track.set_range(start, end))
    }

    pub fn set_start_time(&mut self, t: Duration) -> Result<LoopRange, PlaybackError> {
        self.update_range(|track| track.set_start_time(t))
    }

    pub fn set_end_time(&mut self, t: Duration) -> Result<LoopRange, PlaybackError> {
        self.update_range(|track| track.set_end_time(t))
    }

    /// Go back to looping the whole file.
    pub fn reset_loop_range(&mut self) -> Result<LoopRange, PlaybackError> {
        self.update_range(|track| track.reset_range())
    }

    /// Set the output gain, clamped to `0.0..=1.0`. It is kept for tracks
    /// opened later, so it also works with nothing loaded.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self.volume = volume;
        if let Some(track) = self.track.as_mut() {
            track.asset_mut().set_volume(volume);
        }
        debug!(volume, "volume changed");
        volume
    }

    /// Takes effect on the next loop boundary.
    pub fn set_loop_infinite_count(&mut self, n: u32) {
        self.loop_infinite_count = n;
        debug!(threshold = n, "loop threshold changed");
    }

    /// Time until the next poll tick is due, `None` when not playing.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Run the poll tick if its deadline has passed. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != PlaybackState::Playing || !self.timer.fire(now) {
            return false;
        }
        self.tick();
        if self.state == PlaybackState::Playing {
            self.timer.arm(now);
        }
        true
    }

    /// Compare the playhead against the loop range and wrap when it ran past the end.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let Some(track) = self.track.as_mut() else {
            return;
        };

        let range = track.range();
        let asset = track.asset_mut();
        let outcome = match asset.position() {
            Err(e) => TickOutcome::Failed(e),
            Ok(p) if range.contains(p) => TickOutcome::Progressed(p),
            Ok(p) if p < range.start => match asset.seek(range.start) {
                Ok(()) => TickOutcome::Behind,
                Err(e) => TickOutcome::Failed(e),
            },
            Ok(_) => match asset.seek(range.start) {
                Ok(()) => TickOutcome::Wrapped,
                Err(e) => TickOutcome::Failed(e),
            },
        };

        match outcome {
            TickOutcome::Failed(e) => {
                self.record_failure(e);
                return;
            }
            TickOutcome::Progressed(p) => self.position = p,
            TickOutcome::Behind => self.position = range.start,
            TickOutcome::Wrapped => {
                self.position = range.start;
                self.complete_loop();
            }
        }

        self.consecutive_failures = 0;
        self.bus.publish(PlayerEvent::PlaybackProgressed {
            position: self.position,
        });
    }

    fn complete_loop(&mut self) {
        if self.loop_count >= self.loop_infinite_count {
            return;
        }
        self.loop_count += 1;
        debug!(count = self.loop_count, "loop completed");
        self.bus.publish(PlayerEvent::LoopCountChanged {
            count: self.loop_count,
            infinite: self.is_infinite(),
        });
    }

    fn record_failure(&mut self, error: AssetError) {
        self.consecutive_failures += 1;
        debug!(
            error = %error,
            failures = self.consecutive_failures,
            "poll tick skipped"
        );
        if self.consecutive_failures < self.max_tick_failures {
            return;
        }

        let failures = self.consecutive_failures;
        warn!(failures, "media asset unresponsive, stopping playback");
        self.halt();
        self.bus.publish(PlayerEvent::PlaybackFailed(
            PlaybackError::AssetUnresponsive { failures },
        ));
        self.bus.publish(PlayerEvent::PlaybackStopped);
    }

    /// Silence output and rewind to the loop start, leaving the track loaded.
    fn halt(&mut self) {
        self.timer.cancel();
        if let Some(track) = self.track.as_mut() {
            let start = track.start_time();
            let asset = track.asset_mut();
            asset.pause();
            if let Err(e) = asset.seek(start) {
                debug!(error = %e, "could not rewind asset");
            }
            self.position = start;
        }
        self.state = PlaybackState::Loaded;
        self.loop_count = 0;
        self.consecutive_failures = 0;
    }

    fn update_range<F>(&mut self, apply: F) -> Result<LoopRange, PlaybackError>
    where
        F: FnOnce(&mut Track<L::Asset>) -> LoopRange,
    {
        let Some(track) = self.track.as_mut() else {
            return Err(PlaybackError::NoTrackLoaded);
        };

        let range = apply(track);
        let clamped = range.clamp(self.position);
        if clamped != self.position {
            if let Err(e) = track.asset_mut().seek(clamped) {
                debug!(error = %e, "could not move playhead into new range");
            }
            self.position = clamped;
        }

        debug!(start = ?range.start, end = ?range.end, "loop range changed");
        self.bus.publish(PlayerEvent::RangeChanged {
            start: range.start,
            end: range.end,
        });
        Ok(range)
    }
}
