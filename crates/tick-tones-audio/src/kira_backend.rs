//! Kira-based output for real-time cue playback.

use std::collections::HashMap;
use std::io::Cursor;

use anyhow::{Result, anyhow};
use kira::sound::PlaybackState;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};
use log::warn;

use crate::backend::{AudioBackend, SoundId};
use crate::format::AudioFormat;

/// Convert a linear amplitude (0.0 - 1.0) to kira's decibel volume.
pub fn amplitude_to_decibels(volume: f32) -> Decibels {
    if volume <= 0.0 {
        Decibels::SILENCE
    } else {
        Decibels((20.0 * volume.log10()).max(Decibels::SILENCE.0))
    }
}

struct LoadedSound {
    data: StaticSoundData,
    volume: f32,
    /// Voices started from this sound that may still be playing.
    voices: Vec<StaticSoundHandle>,
}

/// Audio backend backed by kira.
///
/// Each play starts an independent voice, so overlapping cues of the same
/// sound are all heard. Volume changes apply to voices started afterwards.
pub struct KiraBackend {
    manager: AudioManager,
    sounds: HashMap<u64, LoadedSound>,
    next_id: u64,
}

impl KiraBackend {
    /// Open the default output device.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| anyhow!("Failed to create audio manager: {e}"))?;
        Ok(Self {
            manager,
            sounds: HashMap::new(),
            next_id: 1,
        })
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl AudioBackend for KiraBackend {
    fn load_sound_from_memory(&mut self, data: &[u8], format: AudioFormat) -> Result<SoundId> {
        let data = match format {
            AudioFormat::Wav | AudioFormat::Mp3 | AudioFormat::Ogg | AudioFormat::Flac => {
                StaticSoundData::from_cursor(Cursor::new(data.to_vec()))
                    .map_err(|e| anyhow!("Failed to decode {} sound: {e}", format.extension()))?
            }
            _ => return Err(anyhow!("Unsupported audio format: {}", format.extension())),
        };

        let id = self.alloc_id();
        self.sounds.insert(
            id,
            LoadedSound {
                data,
                volume: 1.0,
                voices: Vec::new(),
            },
        );
        Ok(SoundId(id))
    }

    fn set_volume(&mut self, id: SoundId, volume: f32) -> Result<()> {
        let sound = self
            .sounds
            .get_mut(&id.0)
            .ok_or_else(|| anyhow!("Sound not found: {:?}", id))?;
        sound.volume = volume;
        Ok(())
    }

    fn play(&mut self, id: SoundId) -> Result<()> {
        let sound = self
            .sounds
            .get_mut(&id.0)
            .ok_or_else(|| anyhow!("Sound not found: {:?}", id))?;
        sound
            .voices
            .retain(|voice| voice.state() != PlaybackState::Stopped);

        let data = sound
            .data
            .clone()
            .volume(amplitude_to_decibels(sound.volume));
        let voice = self
            .manager
            .play(data)
            .map_err(|e| anyhow!("Failed to play sound: {e}"))?;
        sound.voices.push(voice);
        Ok(())
    }

    fn release(&mut self, id: SoundId) -> Result<()> {
        match self.sounds.remove(&id.0) {
            Some(mut sound) => {
                for voice in &mut sound.voices {
                    voice.stop(Tween::default());
                }
            }
            None => warn!("Release of unknown sound {:?}", id),
        }
        Ok(())
    }
}
