//! `rodio` implementation of [`MediaAsset`].
//!
//! Each asset owns one `Sink` on the shared output mixer. A sink whose source
//! has run dry is rebuilt from the file on the next seek, so a loop that ends
//! exactly at the end of the file can still wrap.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::error::{AssetError, LoadError};

use super::asset::{AssetLoader, MediaAsset};

/// Opens [`RodioAsset`]s on the default output device.
pub struct RodioLoader {
    stream: OutputStream,
}

impl RodioLoader {
    pub fn open_default() -> Result<Self, rodio::StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl AssetLoader for RodioLoader {
    type Asset = RodioAsset;

    fn load(&self, location: &Path) -> Result<RodioAsset, LoadError> {
        RodioAsset::open(self.stream.mixer(), location)
    }
}

pub struct RodioAsset {
    path: PathBuf,
    mixer: Mixer,
    sink: Sink,
    duration: Option<Duration>,
    playing: bool,
    volume: f32,
}

impl RodioAsset {
    fn open(mixer: &Mixer, path: &Path) -> Result<Self, LoadError> {
        let source = decode(path)?;
        let duration = source.total_duration();
        let sink = create_sink(mixer, source);

        Ok(Self {
            path: path.to_path_buf(),
            mixer: mixer.clone(),
            sink,
            duration,
            playing: false,
            volume: 1.0,
        })
    }

    /// Replace an exhausted sink with a fresh one over the same file.
    fn rebuild(&mut self) -> Result<(), AssetError> {
        let source = decode(&self.path).map_err(|e| AssetError::Seek(e.to_string()))?;
        let sink = create_sink(&self.mixer, source);
        sink.set_volume(self.volume);
        if self.playing {
            sink.play();
        }
        self.sink.stop();
        self.sink = sink;
        Ok(())
    }
}

impl MediaAsset for RodioAsset {
    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn position(&self) -> Result<Duration, AssetError> {
        if self.sink.empty() {
            // A drained source sits past any loop end.
            return Ok(self.duration.unwrap_or(Duration::MAX));
        }
        Ok(self.sink.get_pos())
    }

    fn seek(&mut self, to: Duration) -> Result<(), AssetError> {
        if self.sink.empty() {
            debug!(path = %self.path.display(), "source drained, reopening before seek");
            self.rebuild()?;
        }
        self.sink
            .try_seek(to)
            .map_err(|e| AssetError::Seek(e.to_string()))
    }

    fn play(&mut self) {
        self.playing = true;
        self.sink.play();
    }

    fn pause(&mut self) {
        self.playing = false;
        self.sink.pause();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.sink.set_volume(volume);
    }
}

pub(super) fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::UnreadableFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // `try_from(File)` records the byte length, which seeking in some formats needs.
    Decoder::try_from(file).map_err(|e| {
        debug!(path = %path.display(), error = %e, "decoder rejected file");
        LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    })
}

/// Create a paused `Sink` on `mixer` holding `source`.
fn create_sink(mixer: &Mixer, source: Decoder<BufReader<File>>) -> Sink {
    let sink = Sink::connect_new(mixer);
    sink.append(source);
    sink.pause();
    sink
}
