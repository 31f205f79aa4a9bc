//! Application model: what the UI shows, rebuilt from controller events.
//!
//! `App` never looks at the controller. Everything it knows arrived as a
//! [`PlayerEvent`] through [`App::apply`], plus the loop threshold and volume
//! which the runtime owns, and the open-file prompt it is typing into.

use std::time::Duration;

use crate::playback::{PlaybackState, PlayerEvent};
use crate::track::{LoopRange, TrackInfo};

/// The view model behind the TUI.
#[derive(Debug, Default)]
pub struct App {
    pub track: Option<TrackInfo>,
    pub playback: PlaybackState,
    pub position: Duration,
    pub range: Option<LoopRange>,
    pub loop_count: u32,
    pub infinite: bool,
    pub loop_infinite_count: u32,
    pub volume: f32,
    /// Path being typed after `o`; `None` when the prompt is closed.
    pub open_prompt: Option<String>,
    /// Last load or playback failure, cleared by the next successful load.
    pub last_error: Option<String>,
    pub metadata_window: bool,
}

impl App {
    pub fn new(loop_infinite_count: u32, volume: f32) -> Self {
        Self {
            loop_infinite_count,
            volume,
            ..Self::default()
        }
    }

    /// Fold one controller event into the model.
    pub fn apply(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::TrackLoaded(info) => {
                self.range = Some(info.range);
                self.position = info.range.start;
                self.track = Some(info.clone());
                self.playback = PlaybackState::Loaded;
                self.reset_loop_count();
                self.last_error = None;
            }
            PlayerEvent::LoadFailed(e) => self.last_error = Some(e.to_string()),
            PlayerEvent::PlaybackStarted => self.playback = PlaybackState::Playing,
            PlayerEvent::PlaybackPaused => self.playback = PlaybackState::Paused,
            PlayerEvent::PlaybackStopped => {
                self.playback = PlaybackState::Loaded;
                if let Some(range) = self.range {
                    self.position = range.start;
                }
                self.reset_loop_count();
            }
            PlayerEvent::PlaybackFailed(e) => self.last_error = Some(e.to_string()),
            PlayerEvent::PlaybackProgressed { position } => self.position = *position,
            PlayerEvent::RangeChanged { start, end } => {
                let range = LoopRange {
                    start: *start,
                    end: *end,
                };
                self.range = Some(range);
                if let Some(track) = self.track.as_mut() {
                    track.range = range;
                }
            }
            PlayerEvent::LoopCountChanged { count, infinite } => {
                self.loop_count = *count;
                self.infinite = *infinite;
            }
        }
    }

    /// Mirror a threshold change made on the controller.
    pub fn set_loop_infinite_count(&mut self, n: u32) {
        self.loop_infinite_count = n;
        self.infinite = self.loop_count >= n;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    pub fn is_prompting(&self) -> bool {
        self.open_prompt.is_some()
    }

    /// Open the path prompt, starting from an empty line.
    pub fn enter_open_prompt(&mut self) {
        self.open_prompt = Some(String::new());
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(line) = self.open_prompt.as_mut() {
            line.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(line) = self.open_prompt.as_mut() {
            line.pop();
        }
    }

    pub fn cancel_open_prompt(&mut self) {
        self.open_prompt = None;
    }

    /// Close the prompt and hand back the trimmed path, if one was typed.
    pub fn take_open_prompt(&mut self) -> Option<String> {
        self.open_prompt
            .take()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// How far the playhead is through the loop range, in `0.0..=1.0`.
    pub fn loop_progress(&self) -> f64 {
        let Some(range) = self.range else {
            return 0.0;
        };
        let span = range.span().as_secs_f64();
        if span <= 0.0 {
            return 0.0;
        }
        let into = self.position.saturating_sub(range.start).as_secs_f64();
        (into / span).clamp(0.0, 1.0)
    }

    fn reset_loop_count(&mut self) {
        self.loop_count = 0;
        self.infinite = false;
    }
}
