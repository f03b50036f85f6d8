use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::settings::SETTINGS_FILE;

/// Host configuration folder inside a vault.
pub const DEFAULT_CONFIG_DIR: &str = ".obsidian";

/// Plugin id used when no manifest is available.
pub const DEFAULT_PLUGIN_ID: &str = "tick-tones";

/// The plugin's `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub min_app_version: Option<String>,
}

impl PluginManifest {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }
}

/// Paths the plugin reads from, derived from its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    plugin_dir: PathBuf,
}

impl PluginPaths {
    pub fn new(plugin_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugin_dir: plugin_dir.into(),
        }
    }

    /// `<vault>/<config_dir>/plugins/<plugin_id>`
    pub fn in_vault(vault: &Path, config_dir: &str, plugin_id: &str) -> Self {
        Self::new(vault.join(config_dir).join("plugins").join(plugin_id))
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.plugin_dir.join(tick_tones_audio::ASSETS_DIR)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.plugin_dir.join(SETTINGS_FILE)
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.plugin_dir.join("manifest.json")
    }
}
