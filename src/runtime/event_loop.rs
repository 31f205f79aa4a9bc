use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AssetLoader;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playback::{PlaybackController, PlayerEvent};
use crate::runtime::actions::{self, Action};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// Longest the loop blocks on input while nothing is playing, so MPRIS
/// commands still get picked up.
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// Main terminal event loop: hosts the poll timer, folds controller events
/// into `app`, draws, and routes keys and MPRIS commands. Returns `Ok(())`
/// when shutdown is requested.
pub fn run<L: AssetLoader>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlaybackController<L>,
    app: &mut App,
    events: &mpsc::Receiver<PlayerEvent>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        drain_events(events, app, mpris);
        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if actions::apply(Action::from(cmd), settings, controller, app) {
                return Ok(());
            }
        }

        let timeout = wait_for(controller.next_tick_in(Instant::now()));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = actions::key_action(key, app.is_prompting()) {
                    if actions::apply(action, settings, controller, app) {
                        return Ok(());
                    }
                }
            }
        }

        controller.poll(Instant::now());
    }
}

fn drain_events(events: &mpsc::Receiver<PlayerEvent>, app: &mut App, mpris: &MprisHandle) {
    for event in events.try_iter() {
        app.apply(&event);
        update_mpris(mpris, app, &event);
    }
}

/// How long to block on input before the next tick is due.
pub(super) fn wait_for(next_tick: Option<Duration>) -> Duration {
    next_tick.map_or(IDLE_WAIT, |d| d.min(IDLE_WAIT))
}
