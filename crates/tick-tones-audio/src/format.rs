use std::path::Path;

/// Audio container formats accepted from the asset folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
    Ogg,
    Flac,
    Aac,
    M4a,
    Opus,
    Webm,
}

impl AudioFormat {
    /// Every supported format, in allow-list order.
    pub const ALL: [AudioFormat; 8] = [
        AudioFormat::Wav,
        AudioFormat::Mp3,
        AudioFormat::Ogg,
        AudioFormat::Flac,
        AudioFormat::Aac,
        AudioFormat::M4a,
        AudioFormat::Opus,
        AudioFormat::Webm,
    ];

    /// Look up a format by file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical lowercase extension.
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::Aac => "aac",
            AudioFormat::M4a => "m4a",
            AudioFormat::Opus => "opus",
            AudioFormat::Webm => "webm",
        }
    }

    /// MIME type used in data URIs.
    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Aac => "audio/aac",
            AudioFormat::M4a => "audio/mp4",
            AudioFormat::Opus => "audio/opus",
            AudioFormat::Webm => "audio/webm",
        }
    }
}

/// MIME type for an arbitrary extension, falling back to wav.
pub fn mime_for_extension(ext: &str) -> &'static str {
    AudioFormat::from_extension(ext)
        .unwrap_or_default()
        .mime_type()
}
