//! Host integration for tick tones: persisted settings, the per-view click
//! registry and the plugin lifecycle that wires them to the sound engine.

pub mod host;
pub mod listener;
pub mod manifest;
pub mod plugin;
pub mod registry;
pub mod settings;

pub use host::{
    ClickEvent, ClickListener, EventTarget, HostView, ListenerList, ViewRoot, Workspace,
};
pub use listener::{checkbox_listener, sound_listener};
pub use manifest::{DEFAULT_CONFIG_DIR, DEFAULT_PLUGIN_ID, PluginManifest, PluginPaths};
pub use plugin::TickTones;
pub use registry::ViewClickRegistry;
pub use settings::{DEFAULT_SOUND, SETTINGS_FILE, TickTonesSettings};
