//! Media backend.
//!
//! The playback engine only talks to [`MediaAsset`] and [`AssetLoader`]; the
//! `rodio` types here are the production implementation.

mod asset;
mod sink;

#[cfg(test)]
pub(crate) mod fake;

pub use asset::{AssetLoader, MediaAsset};
pub use sink::RodioLoader;
