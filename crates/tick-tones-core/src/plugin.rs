use std::cell::{Ref, RefCell};
use std::rc::Rc;

use anyhow::Result;
use log::{error, info, warn};
use tick_tones_audio::{AssetLoader, AudioBackend, CueKind, Notifier, SoundManager};

use crate::host::{HostView, Workspace};
use crate::listener::sound_listener;
use crate::manifest::PluginPaths;
use crate::registry::ViewClickRegistry;
use crate::settings::TickTonesSettings;

struct Wiring<A: AudioBackend> {
    sounds: Rc<RefCell<SoundManager<A>>>,
    registry: ViewClickRegistry,
}

/// The plugin: settings, sound manager and view registry wired to the host's
/// lifecycle.
///
/// If setup fails the plugin stays inert: no listeners are attached and every
/// lifecycle call is a no-op.
pub struct TickTones<A: AudioBackend + 'static> {
    paths: PluginPaths,
    settings: Rc<RefCell<TickTonesSettings>>,
    wiring: Option<Wiring<A>>,
}

impl<A: AudioBackend + 'static> TickTones<A> {
    /// Load settings, open audio through `backend` and load the sounds.
    pub async fn load<F, N>(paths: PluginPaths, backend: F, notifier: N) -> Self
    where
        F: FnOnce() -> Result<A>,
        N: Notifier + 'static,
    {
        let settings = match TickTonesSettings::load_from(paths.settings_file()) {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to load settings, using defaults: {e:#}");
                return Self::inert(paths, TickTonesSettings::default());
            }
        };

        let backend = match backend() {
            Ok(backend) => backend,
            Err(e) => {
                error!("Failed to initialise audio, sound cues disabled: {e:#}");
                return Self::inert(paths, settings);
            }
        };

        let loader = AssetLoader::new(paths.assets_dir());
        let mut manager = SoundManager::new(loader, backend).with_notifier(notifier);
        manager.init().await;
        info!(
            "Tick tones loaded with {} sounds from {}",
            manager.library().len(),
            paths.assets_dir().display()
        );

        let sounds = Rc::new(RefCell::new(manager));
        let settings = Rc::new(RefCell::new(settings));
        let listener = sound_listener(Rc::clone(&sounds), Rc::clone(&settings));
        let registry = ViewClickRegistry::new(listener);

        Self {
            paths,
            settings,
            wiring: Some(Wiring { sounds, registry }),
        }
    }

    fn inert(paths: PluginPaths, settings: TickTonesSettings) -> Self {
        Self {
            paths,
            settings: Rc::new(RefCell::new(settings)),
            wiring: None,
        }
    }

    /// Whether setup succeeded and the plugin is (or can be) listening.
    pub fn is_active(&self) -> bool {
        self.wiring.is_some()
    }

    pub fn paths(&self) -> &PluginPaths {
        &self.paths
    }

    /// Host layout is ready: start listening on the active view.
    pub fn on_layout_ready(&mut self, workspace: &dyn Workspace) {
        if let Some(view) = workspace.active_view() {
            self.on_active_view_change(Some(view));
        }
    }

    /// The active view changed; register it if it is new.
    pub fn on_active_view_change(&mut self, view: Option<Rc<dyn HostView>>) {
        let (Some(wiring), Some(view)) = (self.wiring.as_mut(), view) else {
            return;
        };
        wiring.registry.register_view(&view);
    }

    /// The host closed a view.
    pub fn on_view_closed(&mut self, view: &Rc<dyn HostView>) {
        if let Some(wiring) = self.wiring.as_mut() {
            wiring.registry.unregister_view(view);
        }
    }

    /// Detach from every view, then release all playback resources.
    ///
    /// If the sound manager is borrowed elsewhere the views are still
    /// detached, but the plugin keeps its wiring so a later call can release
    /// the sounds.
    pub fn unload(&mut self) {
        let Some(wiring) = self.wiring.as_mut() else {
            return;
        };
        let detached = wiring.registry.unregister_all();
        let released = match wiring.sounds.try_borrow_mut() {
            Ok(mut manager) => {
                manager.unload();
                true
            }
            Err(_) => false,
        };
        if !released {
            warn!("Sound manager still in use, sounds not released yet");
            return;
        }
        self.wiring = None;
        info!("Tick tones unloaded ({detached} views detached)");
    }

    /// Names of the loaded sounds.
    pub fn sounds(&self) -> Vec<String> {
        self.wiring
            .as_ref()
            .map(|w| w.sounds.borrow().get_sounds())
            .unwrap_or_default()
    }

    /// Re-scan the asset folder.
    pub async fn reload_sounds(&self) {
        let Some(wiring) = self.wiring.as_ref() else {
            return;
        };
        let loader = wiring.sounds.borrow().loader().clone();
        let library = loader.load_sounds().await;
        wiring.sounds.borrow_mut().replace_library(library);
    }

    /// Play the cue's configured sound at its volume, ignoring the enabled
    /// flag. Used to audition a selection.
    pub fn preview_sound(&self, kind: CueKind) {
        let Some(wiring) = self.wiring.as_ref() else {
            return;
        };
        let (name, volume) = {
            let settings = self.settings.borrow();
            (settings.sound(kind).to_string(), settings.volume(kind))
        };
        wiring.sounds.borrow_mut().play_sound(&name, volume);
    }

    pub fn settings(&self) -> Ref<'_, TickTonesSettings> {
        self.settings.borrow()
    }

    /// Edit the settings, then validate and persist them.
    pub fn update_settings<F>(&self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut TickTonesSettings),
    {
        let mut settings = self.settings.borrow_mut();
        edit(&mut *settings);
        settings.validate();
        settings.save_to(self.paths.settings_file())
    }

    pub fn sound_manager(&self) -> Option<&Rc<RefCell<SoundManager<A>>>> {
        self.wiring.as_ref().map(|w| &w.sounds)
    }

    pub fn registry(&self) -> Option<&ViewClickRegistry> {
        self.wiring.as_ref().map(|w| &w.registry)
    }
}
