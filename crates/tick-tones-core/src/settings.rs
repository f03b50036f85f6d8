use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tick_tones_audio::{CueKind, CuePolicy, PlaybackPolicy};

/// Name of the persisted settings file inside the plugin directory.
pub const SETTINGS_FILE: &str = "data.json";

/// Sound used for both cues until the user picks one.
pub const DEFAULT_SOUND: &str = "Task_Completed";

const DEFAULT_VOLUME: f32 = 0.6;

/// Persisted plugin settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct TickTonesSettings {
    pub tick_sound_enabled: bool,
    pub tick_sound: String,
    pub tick_sound_volume: f32,
    pub use_random_tick_sound: bool,
    pub tick_sounds: Vec<String>,
    pub untick_sound_enabled: bool,
    pub untick_sound: String,
    pub untick_sound_volume: f32,
    pub use_random_untick_sound: bool,
    pub untick_sounds: Vec<String>,
}

impl Default for TickTonesSettings {
    fn default() -> Self {
        Self {
            tick_sound_enabled: true,
            tick_sound: DEFAULT_SOUND.to_string(),
            tick_sound_volume: DEFAULT_VOLUME,
            use_random_tick_sound: false,
            tick_sounds: Vec::new(),
            untick_sound_enabled: false,
            untick_sound: DEFAULT_SOUND.to_string(),
            untick_sound_volume: DEFAULT_VOLUME,
            use_random_untick_sound: false,
            untick_sounds: Vec::new(),
        }
    }
}

impl TickTonesSettings {
    /// Loads settings from a file.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let mut settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings {}", path.display()))?;
        settings.validate();
        Ok(settings)
    }

    /// Saves settings to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings {}", path.display()))?;
        Ok(())
    }

    /// Clamp volumes into 0.0 - 1.0.
    pub fn validate(&mut self) {
        self.tick_sound_volume = clamp_volume(self.tick_sound_volume);
        self.untick_sound_volume = clamp_volume(self.untick_sound_volume);
    }

    /// Snapshot of both cues for the sound manager.
    pub fn policy(&self) -> PlaybackPolicy {
        PlaybackPolicy {
            tick: CuePolicy {
                enabled: self.tick_sound_enabled,
                sound: self.tick_sound.clone(),
                volume: self.tick_sound_volume,
                random: self.use_random_tick_sound,
                candidates: self.tick_sounds.clone(),
            },
            untick: CuePolicy {
                enabled: self.untick_sound_enabled,
                sound: self.untick_sound.clone(),
                volume: self.untick_sound_volume,
                random: self.use_random_untick_sound,
                candidates: self.untick_sounds.clone(),
            },
        }
    }

    pub fn enabled(&self, kind: CueKind) -> bool {
        match kind {
            CueKind::Tick => self.tick_sound_enabled,
            CueKind::Untick => self.untick_sound_enabled,
        }
    }

    pub fn set_enabled(&mut self, kind: CueKind, enabled: bool) {
        match kind {
            CueKind::Tick => self.tick_sound_enabled = enabled,
            CueKind::Untick => self.untick_sound_enabled = enabled,
        }
    }

    pub fn sound(&self, kind: CueKind) -> &str {
        match kind {
            CueKind::Tick => &self.tick_sound,
            CueKind::Untick => &self.untick_sound,
        }
    }

    pub fn set_sound(&mut self, kind: CueKind, sound: impl Into<String>) {
        match kind {
            CueKind::Tick => self.tick_sound = sound.into(),
            CueKind::Untick => self.untick_sound = sound.into(),
        }
    }

    pub fn volume(&self, kind: CueKind) -> f32 {
        match kind {
            CueKind::Tick => self.tick_sound_volume,
            CueKind::Untick => self.untick_sound_volume,
        }
    }

    /// Set a cue volume, clamped into 0.0 - 1.0.
    pub fn set_volume(&mut self, kind: CueKind, volume: f32) {
        let volume = clamp_volume(volume);
        match kind {
            CueKind::Tick => self.tick_sound_volume = volume,
            CueKind::Untick => self.untick_sound_volume = volume,
        }
    }

    pub fn set_random(&mut self, kind: CueKind, random: bool) {
        match kind {
            CueKind::Tick => self.use_random_tick_sound = random,
            CueKind::Untick => self.use_random_untick_sound = random,
        }
    }

    /// Random-mode candidates for a cue.
    pub fn random_sounds(&self, kind: CueKind) -> &[String] {
        match kind {
            CueKind::Tick => &self.tick_sounds,
            CueKind::Untick => &self.untick_sounds,
        }
    }

    /// Add `name` to the cue's candidates, or remove it if already selected.
    /// Returns whether the sound is selected afterwards.
    pub fn toggle_random_sound(&mut self, kind: CueKind, name: &str) -> bool {
        let list = match kind {
            CueKind::Tick => &mut self.tick_sounds,
            CueKind::Untick => &mut self.untick_sounds,
        };
        if list.iter().any(|s| s == name) {
            list.retain(|s| s != name);
            false
        } else {
            list.push(name.to_string());
            true
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        DEFAULT_VOLUME
    } else {
        volume.clamp(0.0, 1.0)
    }
}
