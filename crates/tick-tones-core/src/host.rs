//! Interface to the host application's views and their click events.

use std::cell::RefCell;
use std::rc::Rc;

use tick_tones_audio::CueKind;

/// A click callback. Listeners are compared by identity (`Rc::ptr_eq`), so the
/// value passed to removal must be a clone of the one that was added.
pub type ClickListener = Rc<dyn Fn(&ClickEvent)>;

/// The element a click landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTarget {
    /// An `<input>` element; `checked` is its state after the click toggled it.
    Input { input_type: String, checked: bool },
    /// Any other element.
    Element { tag: String },
}

impl EventTarget {
    pub fn checkbox(checked: bool) -> Self {
        EventTarget::Input {
            input_type: "checkbox".to_string(),
            checked,
        }
    }

    pub fn element(tag: impl Into<String>) -> Self {
        EventTarget::Element { tag: tag.into() }
    }

    /// `Some(checked)` when the target is a checkbox input.
    pub fn checkbox_state(&self) -> Option<bool> {
        match self {
            EventTarget::Input {
                input_type,
                checked,
            } if input_type.eq_ignore_ascii_case("checkbox") => Some(*checked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub target: Option<EventTarget>,
}

impl ClickEvent {
    pub fn on(target: EventTarget) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Cue for this click: tick when a checkbox became checked, untick when
    /// it became unchecked, nothing for other targets.
    pub fn cue_kind(&self) -> Option<CueKind> {
        let checked = self.target.as_ref()?.checkbox_state()?;
        Some(if checked {
            CueKind::Tick
        } else {
            CueKind::Untick
        })
    }
}

/// A view's root element, where click listeners are attached.
pub trait ViewRoot {
    fn add_click_listener(&self, listener: &ClickListener, capture: bool);
    fn remove_click_listener(&self, listener: &ClickListener, capture: bool);
}

/// An open document view owned by the host.
pub trait HostView {
    fn root(&self) -> &dyn ViewRoot;
}

/// The host's workspace: knows which view is active.
pub trait Workspace {
    fn active_view(&self) -> Option<Rc<dyn HostView>>;
}

/// Listener storage with DOM semantics: adding the same (listener, capture)
/// pair twice is ignored and removal matches by identity. Capture listeners
/// run before bubble listeners.
#[derive(Default)]
pub struct ListenerList {
    entries: RefCell<Vec<(ClickListener, bool)>>,
}

impl ListenerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the pair was already present.
    pub fn add(&self, listener: &ClickListener, capture: bool) -> bool {
        if self.contains(listener, capture) {
            return false;
        }
        self.entries
            .borrow_mut()
            .push((Rc::clone(listener), capture));
        true
    }

    /// Returns false when no matching pair was found.
    pub fn remove(&self, listener: &ClickListener, capture: bool) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(l, c)| !(*c == capture && Rc::ptr_eq(l, listener)));
        entries.len() != before
    }

    /// Deliver a click to every listener, capture phase first.
    ///
    /// Listeners added during dispatch wait for the next click; listeners
    /// removed during dispatch are not called.
    pub fn dispatch(&self, event: &ClickEvent) {
        let entries: Vec<(ClickListener, bool)> = self.entries.borrow().clone();
        for phase in [true, false] {
            for (listener, capture) in entries.iter().filter(|(_, c)| *c == phase) {
                if self.contains(listener, *capture) {
                    listener(event);
                }
            }
        }
    }

    fn contains(&self, listener: &ClickListener, capture: bool) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, c)| *c == capture && Rc::ptr_eq(l, listener))
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ViewRoot for ListenerList {
    fn add_click_listener(&self, listener: &ClickListener, capture: bool) {
        self.add(listener, capture);
    }

    fn remove_click_listener(&self, listener: &ClickListener, capture: bool) {
        self.remove(listener, capture);
    }
}
