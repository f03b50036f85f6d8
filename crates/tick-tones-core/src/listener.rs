use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use tick_tones_audio::{AudioBackend, CueKind, SoundManager};

use crate::host::{ClickEvent, ClickListener};
use crate::settings::TickTonesSettings;

/// Listener that calls `on_toggle` for checkbox clicks and ignores the rest.
pub fn checkbox_listener<F>(on_toggle: F) -> ClickListener
where
    F: Fn(CueKind) + 'static,
{
    Rc::new(move |event: &ClickEvent| {
        if let Some(kind) = event.cue_kind() {
            on_toggle(kind);
        }
    })
}

/// The shared listener attached to every view: plays the cue for the toggle
/// using the settings current at click time.
pub fn sound_listener<A>(
    sounds: Rc<RefCell<SoundManager<A>>>,
    settings: Rc<RefCell<TickTonesSettings>>,
) -> ClickListener
where
    A: AudioBackend + 'static,
{
    checkbox_listener(move |kind| {
        let policy = match settings.try_borrow() {
            Ok(settings) => settings.policy(),
            Err(_) => {
                warn!("Settings are being edited, dropping {} cue", kind.label());
                return;
            }
        };
        match sounds.try_borrow_mut() {
            Ok(mut manager) => manager.play_cue(kind, &policy),
            Err(_) => warn!("Sound manager busy, dropping {} cue", kind.label()),
        }
    })
}
