use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::asset::{SoundAsset, SoundLibrary};
use crate::format::AudioFormat;

/// Name of the asset folder inside a plugin directory.
pub const ASSETS_DIR: &str = "assets";

/// Scans the asset folder and encodes every supported audio file.
///
/// Loading never fails: a missing folder yields an empty library and an I/O
/// error ends the pass with whatever was read before it.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    assets_dir: PathBuf,
}

impl AssetLoader {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Loader for `<plugin_dir>/assets`.
    pub fn for_plugin_dir(plugin_dir: &Path) -> Self {
        Self::new(plugin_dir.join(ASSETS_DIR))
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Load every supported sound in listing order.
    ///
    /// Two files with the same stem (e.g. `chime.wav` and `chime.ogg`) share a
    /// name; whichever the directory listing yields last wins. Listing order is
    /// platform dependent, so which one survives is not stable.
    ///
    /// Only regular files (or symlinks to them) are read; directories are
    /// skipped whatever their name. A file named just `.wav` has no stem and
    /// is skipped rather than loaded under an empty name.
    pub async fn load_sounds(&self) -> SoundLibrary {
        let mut library = SoundLibrary::new();
        if let Err(e) = self.scan(&mut library).await {
            error!(
                "Error loading sounds from {}: {e:#}",
                self.assets_dir.display()
            );
        }
        library
    }

    async fn scan(&self, library: &mut SoundLibrary) -> Result<()> {
        let dir = &self.assets_dir;
        let exists = tokio::fs::try_exists(dir)
            .await
            .with_context(|| format!("Failed to check assets folder {}", dir.display()))?;
        if !exists {
            error!("Assets folder not found at: {}", dir.display());
            return Ok(());
        }

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to list {}", dir.display()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("Failed to list {}", dir.display()))?
        {
            let path = entry.path();
            let Some(format) = AudioFormat::from_path(&path) else {
                debug!("Skipping unsupported file {}", path.display());
                continue;
            };
            let Some(name) = sound_name(&path) else {
                continue;
            };
            let metadata = tokio::fs::metadata(&path)
                .await
                .with_context(|| format!("Failed to stat {}", path.display()))?;
            if !metadata.is_file() {
                debug!("Skipping non-file entry {}", path.display());
                continue;
            }

            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            if library
                .insert(SoundAsset::encode(name.as_str(), format, &bytes))
                .is_some()
            {
                warn!(
                    "Sound \"{name}\" found more than once, {} replaces the earlier file",
                    path.display()
                );
            }
        }

        info!("Loaded {} sounds from {}", library.len(), dir.display());
        Ok(())
    }
}

/// Sound name for an asset path: the file name without its extension.
pub fn sound_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
