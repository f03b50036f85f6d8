use std::collections::HashMap;

use anyhow::{Result, anyhow};
use log::debug;

use crate::backend::{AudioBackend, SoundId};
use crate::format::AudioFormat;

/// Backend that keeps track of loaded sounds but produces no audio.
///
/// Used when no output device is available and by hosts that only need the
/// selection logic.
#[derive(Debug, Default)]
pub struct SilentBackend {
    /// Loaded sounds: id -> (format, byte length).
    sounds: HashMap<u64, (AudioFormat, usize)>,
    /// Last requested volume per sound.
    volumes: HashMap<u64, f32>,
    /// Every triggered play, in order.
    plays: Vec<SoundId>,
    next_id: u64,
}

impl SilentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggered plays, oldest first.
    pub fn plays(&self) -> &[SoundId] {
        &self.plays
    }

    /// Last volume requested for `id`.
    pub fn volume(&self, id: SoundId) -> Option<f32> {
        self.volumes.get(&id.0).copied()
    }

    /// Number of sounds currently loaded.
    pub fn loaded_count(&self) -> usize {
        self.sounds.len()
    }
}

impl AudioBackend for SilentBackend {
    fn load_sound_from_memory(&mut self, data: &[u8], format: AudioFormat) -> Result<SoundId> {
        self.next_id += 1;
        let id = self.next_id;
        self.sounds.insert(id, (format, data.len()));
        Ok(SoundId(id))
    }

    fn set_volume(&mut self, id: SoundId, volume: f32) -> Result<()> {
        if !self.sounds.contains_key(&id.0) {
            return Err(anyhow!("Sound not found: {:?}", id));
        }
        self.volumes.insert(id.0, volume);
        Ok(())
    }

    fn play(&mut self, id: SoundId) -> Result<()> {
        let (format, len) = self
            .sounds
            .get(&id.0)
            .ok_or_else(|| anyhow!("Sound not found: {:?}", id))?;
        debug!(
            "Silent play of {:?} ({}, {} bytes, volume {:.2})",
            id,
            format.mime_type(),
            len,
            self.volumes.get(&id.0).copied().unwrap_or(1.0)
        );
        self.plays.push(id);
        Ok(())
    }

    fn release(&mut self, id: SoundId) -> Result<()> {
        self.sounds.remove(&id.0);
        self.volumes.remove(&id.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_plays_and_volume() {
        let mut backend = SilentBackend::new();
        let id = backend
            .load_sound_from_memory(b"riff", AudioFormat::Wav)
            .unwrap();
        backend.set_volume(id, 0.4).unwrap();
        backend.play(id).unwrap();
        backend.play(id).unwrap();

        assert_eq!(backend.plays(), &[id, id]);
        assert_eq!(backend.volume(id), Some(0.4));
    }

    #[test]
    fn released_sound_cannot_play() {
        let mut backend = SilentBackend::new();
        let id = backend
            .load_sound_from_memory(b"riff", AudioFormat::Wav)
            .unwrap();
        backend.release(id).unwrap();

        assert!(backend.play(id).is_err());
        assert_eq!(backend.loaded_count(), 0);
    }
}
