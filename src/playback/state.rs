/// Where the controller is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No track.
    #[default]
    Idle,
    /// Track present, not started (or stopped).
    Loaded,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn has_track(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loaded => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}
