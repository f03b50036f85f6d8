//! A scripted stand-in for the host workspace.
//!
//! Scripts are JSON arrays of steps, e.g.
//! `[{"action":"open","view":"a"},{"action":"check","view":"a","checked":true}]`.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde::Deserialize;
use tick_tones_audio::AudioBackend;
use tick_tones_core::{
    ClickEvent, EventTarget, HostView, ListenerList, TickTones, ViewRoot, Workspace,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    /// Open a view. The first view opened becomes active.
    Open { view: String },
    /// Make an open view the active one.
    Activate { view: String },
    Close { view: String },
    /// Toggle a checkbox; `checked` is its state after the click.
    Check { view: String, checked: bool },
    /// Click a non-checkbox element.
    Click { view: String, tag: String },
    Wait { ms: u64 },
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script {}", path.display()))
}

struct SimView {
    root: ListenerList,
}

impl HostView for SimView {
    fn root(&self) -> &dyn ViewRoot {
        &self.root
    }
}

struct OpenView {
    sim: Rc<SimView>,
    host: Rc<dyn HostView>,
}

#[derive(Default)]
pub struct SimWorkspace {
    views: HashMap<String, OpenView>,
    active: Option<String>,
}

impl Workspace for SimWorkspace {
    fn active_view(&self) -> Option<Rc<dyn HostView>> {
        let name = self.active.as_ref()?;
        self.views.get(name).map(|v| Rc::clone(&v.host))
    }
}

impl SimWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners currently attached to `view`, if it is open.
    #[cfg(test)]
    pub fn listener_count(&self, view: &str) -> Option<usize> {
        self.views.get(view).map(|v| v.sim.root.len())
    }

    fn view(&self, name: &str) -> Result<&OpenView> {
        match self.views.get(name) {
            Some(view) => Ok(view),
            None => bail!("View \"{name}\" is not open"),
        }
    }

    /// Apply the steps in order. Returns how many clicks were dispatched.
    pub async fn run<A: AudioBackend + 'static>(
        &mut self,
        plugin: &mut TickTones<A>,
        steps: &[Step],
    ) -> Result<usize> {
        plugin.on_layout_ready(&*self);
        let mut clicks = 0;

        for (i, step) in steps.iter().enumerate() {
            debug!("Step {i}: {step:?}");
            match step {
                Step::Open { view } => {
                    if self.views.contains_key(view) {
                        bail!("View \"{view}\" is already open");
                    }
                    let sim = Rc::new(SimView {
                        root: ListenerList::new(),
                    });
                    let host: Rc<dyn HostView> = sim.clone();
                    self.views.insert(view.clone(), OpenView { sim, host });
                    if self.active.is_none() {
                        self.active = Some(view.clone());
                        plugin.on_active_view_change(self.active_view());
                    }
                }
                Step::Activate { view } => {
                    let host = Rc::clone(&self.view(view)?.host);
                    self.active = Some(view.clone());
                    plugin.on_active_view_change(Some(host));
                }
                Step::Close { view } => {
                    let Some(closed) = self.views.remove(view) else {
                        bail!("View \"{view}\" is not open");
                    };
                    plugin.on_view_closed(&closed.host);
                    if self.active.as_deref() == Some(view.as_str()) {
                        self.active = None;
                        plugin.on_active_view_change(None);
                    }
                }
                Step::Check { view, checked } => {
                    let target = EventTarget::checkbox(*checked);
                    self.view(view)?.sim.root.dispatch(&ClickEvent::on(target));
                    clicks += 1;
                }
                Step::Click { view, tag } => {
                    let target = EventTarget::element(tag.as_str());
                    self.view(view)?.sim.root.dispatch(&ClickEvent::on(target));
                    clicks += 1;
                }
                Step::Wait { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
            }
        }

        info!("Simulation finished: {} steps, {clicks} clicks", steps.len());
        Ok(clicks)
    }
}
