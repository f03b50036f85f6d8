//! Recording audio backend shared by the unit tests.

use anyhow::{Result, anyhow};

use crate::backend::{AudioBackend, SoundId};
use crate::format::AudioFormat;

/// Mock audio backend for testing.
pub struct MockAudio {
    next_id: u64,
    pub loads: Vec<(Vec<u8>, AudioFormat)>,
    pub volumes: Vec<(SoundId, f32)>,
    pub played: Vec<SoundId>,
    pub released: Vec<SoundId>,
    pub reject_loads: bool,
}

impl MockAudio {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            loads: Vec::new(),
            volumes: Vec::new(),
            played: Vec::new(),
            released: Vec::new(),
            reject_loads: false,
        }
    }
}

impl AudioBackend for MockAudio {
    fn load_sound_from_memory(&mut self, data: &[u8], format: AudioFormat) -> Result<SoundId> {
        if self.reject_loads {
            return Err(anyhow!("Unsupported audio format: {}", format.extension()));
        }
        self.loads.push((data.to_vec(), format));
        let id = self.next_id;
        self.next_id += 1;
        Ok(SoundId(id))
    }

    fn set_volume(&mut self, id: SoundId, volume: f32) -> Result<()> {
        self.volumes.push((id, volume));
        Ok(())
    }

    fn play(&mut self, id: SoundId) -> Result<()> {
        self.played.push(id);
        Ok(())
    }

    fn release(&mut self, id: SoundId) -> Result<()> {
        self.released.push(id);
        Ok(())
    }
}
