//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and mirrors the loaded track, loop
//! range and transport state as reported by controller events.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
