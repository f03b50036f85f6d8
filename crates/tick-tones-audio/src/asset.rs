use std::collections::HashMap;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::format::AudioFormat;

/// A named audio payload, base64-encoded and tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundAsset {
    name: String,
    format: AudioFormat,
    payload: String,
}

impl SoundAsset {
    /// Encode raw file bytes into an asset.
    pub fn encode(name: impl Into<String>, format: AudioFormat, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            format,
            payload: STANDARD.encode(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Base64 payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.payload)
    }

    /// Decode the payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.payload)
            .with_context(|| format!("Failed to decode payload of sound \"{}\"", self.name))
    }
}

/// Name → asset mapping, iterated in insertion order.
///
/// Re-inserting an existing name replaces the asset in place.
#[derive(Debug, Clone, Default)]
pub struct SoundLibrary {
    assets: Vec<SoundAsset>,
    index: HashMap<String, usize>,
}

impl SoundLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an asset, returning the one it replaced.
    pub fn insert(&mut self, asset: SoundAsset) -> Option<SoundAsset> {
        match self.index.get(asset.name()) {
            Some(&slot) => Some(std::mem::replace(&mut self.assets[slot], asset)),
            None => {
                self.index.insert(asset.name().to_string(), self.assets.len());
                self.assets.push(asset);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SoundAsset> {
        self.index.get(name).map(|&slot| &self.assets[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Sound names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundAsset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl FromIterator<SoundAsset> for SoundLibrary {
    fn from_iter<I: IntoIterator<Item = SoundAsset>>(iter: I) -> Self {
        let mut library = SoundLibrary::new();
        for asset in iter {
            library.insert(asset);
        }
        library
    }
}
