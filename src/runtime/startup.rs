use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::audio::AssetLoader;
use crate::config;
use crate::playback::PlaybackController;

const USAGE: &str = "usage: perpetual <file> [start-seconds] [end-seconds]";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ArgsError {
    #[error("no audio file given\n{}", USAGE)]
    MissingFile,
    #[error("`{value}` is not a number of seconds\n{}", USAGE)]
    InvalidSeconds { value: String },
    #[error("unexpected argument `{value}`\n{}", USAGE)]
    Unexpected { value: String },
}

/// What the command line asked for.
#[derive(Debug, PartialEq)]
pub struct LaunchArgs {
    pub file: PathBuf,
    pub start: Option<Duration>,
    pub end: Option<Duration>,
}

pub fn parse_args<I>(args: I) -> Result<LaunchArgs, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let file = args.next().map(PathBuf::from).ok_or(ArgsError::MissingFile)?;
    let start = args.next().map(|v| parse_seconds(&v)).transpose()?;
    let end = args.next().map(|v| parse_seconds(&v)).transpose()?;
    if let Some(value) = args.next() {
        return Err(ArgsError::Unexpected { value });
    }
    Ok(LaunchArgs { file, start, end })
}

fn parse_seconds(value: &str) -> Result<Duration, ArgsError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
        .ok_or_else(|| ArgsError::InvalidSeconds {
            value: value.to_string(),
        })
}

/// Open the file from the command line, apply its range and maybe start playing.
///
/// A failed open is already on the event bus, so it only gets logged here.
pub fn open_initial<L: AssetLoader>(
    controller: &mut PlaybackController<L>,
    args: &LaunchArgs,
    settings: &config::Settings,
) {
    if controller.open(&args.file).is_err() {
        return;
    }

    let applied = match (args.start, args.end) {
        (Some(start), Some(end)) => controller.set_loop_range(start, end).map(|_| ()),
        (Some(start), None) => controller.set_start_time(start).map(|_| ()),
        (None, Some(end)) => controller.set_end_time(end).map(|_| ()),
        (None, None) => Ok(()),
    };
    let started = applied.and_then(|()| {
        if settings.playback.autoplay {
            controller.play()
        } else {
            Ok(())
        }
    });
    if let Err(e) = started {
        warn!(error = %e, "could not apply launch options");
    }
}
