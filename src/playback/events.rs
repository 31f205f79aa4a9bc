//! Event contract between the controller and its observers.
//!
//! Observers get owned copies over channels and never touch live state.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::error::{LoadError, PlaybackError};
use crate::track::TrackInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A new track replaced the previous one; payload has the default range.
    TrackLoaded(TrackInfo),
    /// `open` failed; the previous track (if any) is untouched.
    LoadFailed(LoadError),
    PlaybackStarted,
    PlaybackPaused,
    /// Back to the loaded state, position at the loop start.
    PlaybackStopped,
    /// Playback was forced to stop. Always followed by `PlaybackStopped`.
    PlaybackFailed(PlaybackError),
    PlaybackProgressed { position: Duration },
    RangeChanged { start: Duration, end: Duration },
    /// The loop counter moved. `infinite` is set once it reached the threshold.
    LoopCountChanged { count: u32, infinite: bool },
}

/// Fan-out publisher over `mpsc` channels.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<PlayerEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber, dropping the ones that hung up.
    pub fn publish(&mut self, event: PlayerEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
