mod app;
mod audio;
mod config;
mod error;
mod logging;
mod metadata;
mod mpris;
mod playback;
mod runtime;
mod track;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
