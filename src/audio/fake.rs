//! In-memory media backend for driving the controller in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::error::{AssetError, LoadError};

use super::asset::{AssetLoader, MediaAsset};

/// Observable and scriptable state behind a [`FakeAsset`].
#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub position: Duration,
    pub playing: bool,
    pub seeks: Vec<Duration>,
    /// Number of upcoming `position` calls that fail.
    pub failing_reads: u32,
    /// Number of upcoming `seek` calls that fail.
    pub failing_seeks: u32,
    /// Last gain applied, `None` until the controller sets one.
    pub volume: Option<f32>,
}

pub(crate) type FakeHandle = Rc<RefCell<FakeState>>;

pub(crate) struct FakeAsset {
    duration: Option<Duration>,
    state: FakeHandle,
}

impl MediaAsset for FakeAsset {
    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn position(&self) -> Result<Duration, AssetError> {
        let mut s = self.state.borrow_mut();
        if s.failing_reads > 0 {
            s.failing_reads -= 1;
            return Err(AssetError::Position("scripted failure".to_string()));
        }
        Ok(s.position)
    }

    fn seek(&mut self, to: Duration) -> Result<(), AssetError> {
        let mut s = self.state.borrow_mut();
        if s.failing_seeks > 0 {
            s.failing_seeks -= 1;
            return Err(AssetError::Seek("scripted failure".to_string()));
        }
        s.position = to;
        s.seeks.push(to);
        Ok(())
    }

    fn play(&mut self) {
        self.state.borrow_mut().playing = true;
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = Some(volume);
    }
}

/// Serves [`FakeAsset`]s for a fixed set of paths; anything else is unreadable.
#[derive(Default)]
pub(crate) struct FakeLoader {
    files: HashMap<PathBuf, (Option<Duration>, FakeHandle)>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file. `None` models a decoder that cannot report a length.
    pub fn with_file(mut self, path: &str, duration: Option<Duration>) -> Self {
        self.files
            .insert(PathBuf::from(path), (duration, FakeHandle::default()));
        self
    }

    pub fn handle(&self, path: &str) -> FakeHandle {
        self.files
            .get(Path::new(path))
            .map(|(_, h)| h.clone())
            .unwrap_or_default()
    }
}

impl AssetLoader for FakeLoader {
    type Asset = FakeAsset;

    fn load(&self, location: &Path) -> Result<FakeAsset, LoadError> {
        let Some((duration, state)) = self.files.get(location) else {
            return Err(LoadError::UnreadableFile {
                path: location.to_path_buf(),
                reason: "No such file or directory".to_string(),
            });
        };

        *state.borrow_mut() = FakeState::default();
        Ok(FakeAsset {
            duration: *duration,
            state: state.clone(),
        })
    }
}
