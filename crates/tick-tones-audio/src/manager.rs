use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::asset::SoundLibrary;
use crate::backend::{AudioBackend, SoundId};
use crate::loader::AssetLoader;
use crate::notice::{LogNotifier, Notifier};
use crate::policy::{CueKind, PlaybackPolicy};
use crate::sound_cache::SoundCache;

/// Notice shown when random mode has nothing to draw from.
pub const NO_RANDOM_SOUND_NOTICE: &str = "No sound available, check your selection.";

/// Owns the sound library and the handle cache, and decides what to play.
///
/// Every play entry point degrades to a logged no-op; nothing here returns an
/// error to the caller.
pub struct SoundManager<A: AudioBackend> {
    loader: AssetLoader,
    library: SoundLibrary,
    cache: SoundCache<A>,
    rng: StdRng,
    notifier: Box<dyn Notifier>,
}

impl<A: AudioBackend> SoundManager<A> {
    /// Create a manager with an empty library. Call [`init`](Self::init) before playing.
    pub fn new(loader: AssetLoader, backend: A) -> Self {
        Self {
            loader,
            library: SoundLibrary::new(),
            cache: SoundCache::new(backend),
            rng: StdRng::from_entropy(),
            notifier: Box::new(LogNotifier),
        }
    }

    /// Route user-facing notices to the host.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Use a seeded random source for candidate draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Load the library for the first time.
    pub async fn init(&mut self) {
        self.library = self.loader.load_sounds().await;
        debug!("Sound manager ready with {} sounds", self.library.len());
    }

    /// Re-scan the asset folder and swap the library.
    /// Cached handles are kept, even for sounds that disappeared.
    pub async fn reload(&mut self) {
        let library = self.loader.load_sounds().await;
        self.replace_library(library);
    }

    /// Swap in a library loaded elsewhere.
    pub fn replace_library(&mut self, library: SoundLibrary) {
        info!(
            "Sound library replaced ({} -> {} sounds)",
            self.library.len(),
            library.len()
        );
        self.library = library;
    }

    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }

    pub fn library(&self) -> &SoundLibrary {
        &self.library
    }

    /// Names of the loaded sounds, in load order.
    pub fn get_sounds(&self) -> Vec<String> {
        self.library.names()
    }

    pub fn play_tick_sound(&mut self, policy: &PlaybackPolicy) {
        self.play_cue(CueKind::Tick, policy);
    }

    pub fn play_untick_sound(&mut self, policy: &PlaybackPolicy) {
        self.play_cue(CueKind::Untick, policy);
    }

    /// Resolve the cue's sound under `policy` and play it.
    pub fn play_cue(&mut self, kind: CueKind, policy: &PlaybackPolicy) {
        let cue = policy.cue(kind);
        if !cue.enabled {
            return;
        }

        let name = if cue.random {
            match self.random_sound(&cue.candidates) {
                Some(name) => name,
                None => return,
            }
        } else {
            cue.sound.as_str()
        };

        debug!("Playing {} sound \"{name}\"", kind.label());
        self.play_sound(name, cue.volume);
    }

    /// Uniform draw over `candidates`. An empty list raises a notice and
    /// returns `None`.
    pub fn random_sound<'a>(&mut self, candidates: &'a [String]) -> Option<&'a str> {
        match candidates.choose(&mut self.rng) {
            Some(name) => Some(name.as_str()),
            None => {
                self.notifier.notice(NO_RANDOM_SOUND_NOTICE);
                warn!("No random sound available, playing nothing.");
                None
            }
        }
    }

    /// Play `name` at `volume`, creating its handle on first use.
    pub fn play_sound(&mut self, name: &str, volume: f32) {
        if self.library.is_empty() {
            warn!("No sounds found. Aborting.");
            return;
        }

        let Some(asset) = self.library.get(name) else {
            error!("Sound \"{name}\" not found.");
            return;
        };

        let id = match self.cache.get_or_load(asset) {
            Ok(id) => id,
            Err(e) => {
                error!("Failed to prepare sound \"{name}\": {e:#}");
                return;
            }
        };

        if let Err(e) = self.cache.set_volume(id, volume) {
            warn!("Failed to set volume of \"{name}\": {e:#}");
        }
        if let Err(e) = self.cache.play(id) {
            error!("Failed to play sound \"{name}\": {e:#}");
        }
    }

    /// Release every cached handle. Safe to call repeatedly.
    pub fn unload(&mut self) {
        let count = self.cache.cached_count();
        if let Err(e) = self.cache.release_all() {
            error!("Error while unloading sounds: {e:#}");
        }
        if count > 0 {
            info!("Unloaded {count} cached sounds");
        }
    }

    /// Number of live playable handles.
    pub fn cached_count(&self) -> usize {
        self.cache.cached_count()
    }

    /// Handle cached for `name`, if it was played since the last unload.
    pub fn handle_id(&self, name: &str) -> Option<SoundId> {
        self.cache.get(name)
    }

    pub fn backend(&self) -> &A {
        self.cache.backend()
    }

    pub fn backend_mut(&mut self) -> &mut A {
        self.cache.backend_mut()
    }
}
