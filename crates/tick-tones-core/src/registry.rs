use std::rc::Rc;

use log::debug;

use crate::host::{ClickListener, HostView};

/// Listeners are attached in the capture phase so the click is seen before
/// the host's own checkbox handling can stop it.
pub const CAPTURE: bool = true;

/// Tracks which views carry the shared click listener.
///
/// Views are identified by reference (`Rc::ptr_eq`). Registering a tracked
/// view or unregistering an untracked one does nothing, so each live view
/// holds the listener at most once.
pub struct ViewClickRegistry {
    listener: ClickListener,
    views: Vec<Rc<dyn HostView>>,
}

impl ViewClickRegistry {
    pub fn new(listener: ClickListener) -> Self {
        Self {
            listener,
            views: Vec::new(),
        }
    }

    /// Attach the listener to `view`. Returns false if it was already registered.
    pub fn register_view(&mut self, view: &Rc<dyn HostView>) -> bool {
        if self.is_registered(view) {
            return false;
        }
        view.root().add_click_listener(&self.listener, CAPTURE);
        self.views.push(Rc::clone(view));
        debug!("Registered view ({} tracked)", self.views.len());
        true
    }

    /// Detach the listener from `view`. Returns false if it was not registered.
    pub fn unregister_view(&mut self, view: &Rc<dyn HostView>) -> bool {
        let Some(pos) = self.views.iter().position(|v| Rc::ptr_eq(v, view)) else {
            return false;
        };
        let view = self.views.remove(pos);
        view.root().remove_click_listener(&self.listener, CAPTURE);
        debug!("Unregistered view ({} tracked)", self.views.len());
        true
    }

    /// Detach from every tracked view. Returns how many were detached.
    pub fn unregister_all(&mut self) -> usize {
        let views = std::mem::take(&mut self.views);
        for view in &views {
            view.root().remove_click_listener(&self.listener, CAPTURE);
        }
        views.len()
    }

    pub fn is_registered(&self, view: &Rc<dyn HostView>) -> bool {
        self.views.iter().any(|v| Rc::ptr_eq(v, view))
    }

    /// Views currently carrying the listener, in registration order.
    pub fn registered_views(&self) -> &[Rc<dyn HostView>] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The shared listener value.
    pub fn listener(&self) -> &ClickListener {
        &self.listener
    }
}
