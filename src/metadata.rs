//! Tag metadata for a single audio file.
//!
//! Reading is best-effort: anything the tags do not provide falls back to
//! values derived from the path.

mod cover;
mod model;
mod read;

pub use model::TrackMetadata;
pub use read::read;
