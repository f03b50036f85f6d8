//! Sound-cue engine: asset loading, handle caching and cue selection.
//!
//! This crate provides:
//! - [`AssetLoader`]: Scans the asset folder into a [`SoundLibrary`]
//! - [`SoundManager`]: Owns the library and the handle cache, plays cues
//! - [`AudioBackend`]: Output abstraction ([`SilentBackend`], `KiraBackend`)
//! - [`PlaybackPolicy`]: Per-cue settings snapshot read on every play

mod asset;
mod backend;
mod format;
#[cfg(feature = "kira")]
mod kira_backend;
mod loader;
mod manager;
mod notice;
mod policy;
mod silent;
mod sound_cache;

#[cfg(test)]
mod test_utils;

pub use asset::{SoundAsset, SoundLibrary};
pub use backend::{AudioBackend, SoundId};
pub use format::{AudioFormat, mime_for_extension};
#[cfg(feature = "kira")]
pub use kira_backend::{KiraBackend, amplitude_to_decibels};
pub use loader::{ASSETS_DIR, AssetLoader, sound_name};
pub use manager::{NO_RANDOM_SOUND_NOTICE, SoundManager};
pub use notice::{LogNotifier, Notifier};
pub use policy::{CueKind, CuePolicy, PlaybackPolicy};
pub use silent::SilentBackend;
pub use sound_cache::SoundCache;
