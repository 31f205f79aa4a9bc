use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioLoader;
use crate::logging;
use crate::mpris::ControlCmd;
use crate::playback::PlaybackController;

mod actions;
mod event_loop;
mod mpris_sync;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    if let Err(e) = logging::init(&settings.logging) {
        // The terminal is still ours at this point.
        eprintln!("perpetual: file logging disabled: {e}");
    }
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let args = startup::parse_args(env::args().skip(1))?;
    info!(file = %args.file.display(), "starting");

    let loader = RodioLoader::open_default()?;
    let mut controller = PlaybackController::new(loader, &settings.playback);
    let events = controller.subscribe();
    let mut app = App::new(controller.loop_infinite_count(), controller.volume());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    startup::open_initial(&mut controller, &args, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        &mut app,
        &events,
        &mpris,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        state = controller.state().label(),
        position = ?controller.position(),
        loops = controller.loop_count(),
        "shutting down"
    );
    controller.stop();
    run_result
}
