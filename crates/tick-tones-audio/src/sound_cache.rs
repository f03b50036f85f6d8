use std::collections::HashMap;

use anyhow::Result;
use log::{debug, warn};

use crate::asset::SoundAsset;
use crate::backend::{AudioBackend, SoundId};

/// Caches playable handles by sound name so each asset is decoded once.
/// Wraps an AudioBackend and owns every handle it hands out.
pub struct SoundCache<A: AudioBackend> {
    backend: A,
    /// Sound name to loaded handle.
    handles: HashMap<String, SoundId>,
}

impl<A: AudioBackend> SoundCache<A> {
    /// Create an empty cache wrapping the given backend.
    pub fn new(backend: A) -> Self {
        Self {
            backend,
            handles: HashMap::new(),
        }
    }

    /// Return the handle for `asset`, creating it on first use.
    pub fn get_or_load(&mut self, asset: &SoundAsset) -> Result<SoundId> {
        if let Some(&id) = self.handles.get(asset.name()) {
            return Ok(id);
        }
        let bytes = asset.decode()?;
        let id = self.backend.load_sound_from_memory(&bytes, asset.format())?;
        debug!("Created handle {:?} for sound \"{}\"", id, asset.name());
        self.handles.insert(asset.name().to_string(), id);
        Ok(id)
    }

    /// Handle already cached for `name`, if any.
    pub fn get(&self, name: &str) -> Option<SoundId> {
        self.handles.get(name).copied()
    }

    /// Set the volume for the next plays of a handle.
    pub fn set_volume(&mut self, id: SoundId, volume: f32) -> Result<()> {
        self.backend.set_volume(id, volume)
    }

    /// Trigger a handle.
    pub fn play(&mut self, id: SoundId) -> Result<()> {
        self.backend.play(id)
    }

    /// Number of cached handles.
    pub fn cached_count(&self) -> usize {
        self.handles.len()
    }

    /// Release every handle and empty the cache.
    ///
    /// A handle that fails to release is logged and still dropped from the
    /// cache; the first such error is returned after all handles were tried.
    pub fn release_all(&mut self) -> Result<()> {
        let mut first_err = None;
        for (name, id) in self.handles.drain() {
            if let Err(e) = self.backend.release(id) {
                warn!("Failed to release sound \"{name}\": {e:#}");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Get a reference to the underlying backend.
    pub fn backend(&self) -> &A {
        &self.backend
    }

    /// Get a mutable reference to the underlying backend.
    pub fn backend_mut(&mut self) -> &mut A {
        &mut self.backend
    }
}
