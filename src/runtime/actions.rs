use std::path::Path;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::debug;

use crate::app::App;
use crate::audio::AssetLoader;
use crate::config;
use crate::mpris::ControlCmd;
use crate::playback::PlaybackController;

/// Something the user asked for, from the keyboard or over MPRIS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    NudgeStart { forward: bool },
    NudgeEnd { forward: bool },
    Scrub { forward: bool },
    Threshold { up: bool },
    Volume { up: bool },
    ResetRange,
    ToggleMetadata,
    OpenPrompt,
    PromptChar(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
}

impl From<ControlCmd> for Action {
    fn from(cmd: ControlCmd) -> Self {
        match cmd {
            ControlCmd::Quit => Self::Quit,
            ControlCmd::Play => Self::Play,
            ControlCmd::Pause => Self::Pause,
            ControlCmd::PlayPause => Self::PlayPause,
            ControlCmd::Stop => Self::Stop,
        }
    }
}

/// Map a key press to an action. While the open prompt is up, keys edit the
/// typed path instead.
pub fn key_action(key: KeyEvent, prompting: bool) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if prompting {
        return match key.code {
            KeyCode::Esc => Some(Action::PromptCancel),
            KeyCode::Enter => Some(Action::PromptSubmit),
            KeyCode::Backspace => Some(Action::PromptBackspace),
            KeyCode::Char(c) if !c.is_control() => Some(Action::PromptChar(c)),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::PlayPause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('[') => Action::NudgeStart { forward: false },
        KeyCode::Char(']') => Action::NudgeStart { forward: true },
        KeyCode::Char('{') => Action::NudgeEnd { forward: false },
        KeyCode::Char('}') => Action::NudgeEnd { forward: true },
        KeyCode::Char('H') | KeyCode::Left => Action::Scrub { forward: false },
        KeyCode::Char('L') | KeyCode::Right => Action::Scrub { forward: true },
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Threshold { up: true },
        KeyCode::Char('-') => Action::Threshold { up: false },
        KeyCode::Char('0') => Action::Volume { up: true },
        KeyCode::Char('9') => Action::Volume { up: false },
        KeyCode::Char('r') => Action::ResetRange,
        KeyCode::Char('K') => Action::ToggleMetadata,
        KeyCode::Char('o') => Action::OpenPrompt,
        _ => return None,
    };
    Some(action)
}

/// Carry out `action`. Returns `true` when the app should exit.
pub fn apply<L: AssetLoader>(
    action: Action,
    settings: &config::Settings,
    controller: &mut PlaybackController<L>,
    app: &mut App,
) -> bool {
    let controls = &settings.controls;
    let range = controller.track().map(|t| t.range());

    let result = match action {
        Action::Quit => return true,
        Action::ToggleMetadata => {
            app.toggle_metadata_window();
            Ok(())
        }
        Action::Threshold { up } => {
            let current = controller.loop_infinite_count();
            let n = if up {
                current.saturating_add(controls.threshold_step)
            } else {
                current.saturating_sub(controls.threshold_step).max(1)
            };
            controller.set_loop_infinite_count(n);
            app.set_loop_infinite_count(n);
            Ok(())
        }
        Action::Volume { up } => {
            let current = controller.volume();
            let target = if up {
                current + controls.volume_step
            } else {
                current - controls.volume_step
            };
            let volume = controller.set_volume(target);
            app.set_volume(volume);
            Ok(())
        }
        Action::OpenPrompt => {
            app.enter_open_prompt();
            Ok(())
        }
        Action::PromptChar(c) => {
            app.push_prompt_char(c);
            Ok(())
        }
        Action::PromptBackspace => {
            app.pop_prompt_char();
            Ok(())
        }
        Action::PromptCancel => {
            app.cancel_open_prompt();
            Ok(())
        }
        Action::PromptSubmit => {
            if let Some(path) = app.take_open_prompt() {
                // Failures already went out as `LoadFailed`.
                let _ = controller.open(Path::new(&path));
            }
            Ok(())
        }
        Action::Play => controller.play(),
        Action::Pause => {
            controller.pause();
            Ok(())
        }
        Action::PlayPause => controller.toggle(),
        Action::Stop => {
            controller.stop();
            Ok(())
        }
        Action::Scrub { forward } => controller.seek_by(controls.scrub(), forward),
        Action::ResetRange => controller.reset_loop_range().map(|_| ()),
        Action::NudgeStart { forward } => match range {
            Some(r) => controller
                .set_start_time(step(r.start, controls.nudge(), forward))
                .map(|_| ()),
            None => Ok(()),
        },
        Action::NudgeEnd { forward } => match range {
            Some(r) => controller
                .set_end_time(step(r.end, controls.nudge(), forward))
                .map(|_| ()),
            None => Ok(()),
        },
    };

    if let Err(e) = result {
        debug!(?action, error = %e, "action ignored");
    }
    false
}

fn step(t: Duration, by: Duration, forward: bool) -> Duration {
    if forward {
        t.saturating_add(by)
    } else {
        t.saturating_sub(by)
    }
}
