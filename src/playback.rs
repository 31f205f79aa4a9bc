//! The loop engine: play/pause/stop state machine, poll-driven boundary
//! handling and the events it publishes.

mod controller;
mod events;
mod state;
mod timer;

pub use controller::PlaybackController;
pub use events::PlayerEvent;
pub use state::PlaybackState;
