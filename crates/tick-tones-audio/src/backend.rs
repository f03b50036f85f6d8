use anyhow::Result;

use crate::format::AudioFormat;

/// Handle for referencing loaded sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u64);

/// Abstraction over audio output.
/// Implementations: KiraBackend (kira), SilentBackend (no device), mocks in tests.
pub trait AudioBackend {
    /// Decode an in-memory file into a ready-to-play sound.
    fn load_sound_from_memory(&mut self, data: &[u8], format: AudioFormat) -> Result<SoundId>;

    /// Set the volume (0.0..=1.0) used by subsequent plays of `id`.
    /// Voices already playing keep the volume they started with.
    fn set_volume(&mut self, id: SoundId, volume: f32) -> Result<()>;

    /// Start one more voice of `id`. Never waits for earlier voices.
    fn play(&mut self, id: SoundId) -> Result<()>;

    /// Stop any voices of `id` and drop its decoded data.
    fn release(&mut self, id: SoundId) -> Result<()>;
}
