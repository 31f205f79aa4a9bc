//! A loaded audio file together with the part of it that loops.

mod model;
mod range;

pub use model::{Track, TrackInfo};
pub use range::LoopRange;
