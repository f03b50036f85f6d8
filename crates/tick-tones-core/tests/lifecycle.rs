//! Plugin lifecycle against a simulated host workspace.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::anyhow;
use tempfile::{TempDir, tempdir};
use tick_tones_audio::{
    CueKind, LogNotifier, NO_RANDOM_SOUND_NOTICE, Notifier, SilentBackend, SoundId,
};
use tick_tones_core::{
    ClickEvent, EventTarget, HostView, ListenerList, PluginPaths, TickTones, ViewRoot, Workspace,
};

struct TestView {
    root: ListenerList,
}

impl TestView {
    fn open() -> (Rc<TestView>, Rc<dyn HostView>) {
        let view = Rc::new(TestView {
            root: ListenerList::new(),
        });
        let host: Rc<dyn HostView> = view.clone();
        (view, host)
    }

    fn click(&self, target: EventTarget) {
        self.root.dispatch(&ClickEvent::on(target));
    }
}

impl HostView for TestView {
    fn root(&self) -> &dyn ViewRoot {
        &self.root
    }
}

struct TestWorkspace {
    active: Option<Rc<dyn HostView>>,
}

impl Workspace for TestWorkspace {
    fn active_view(&self) -> Option<Rc<dyn HostView>> {
        self.active.clone()
    }
}

#[derive(Clone, Default)]
struct Notices(Rc<RefCell<Vec<String>>>);

impl Notifier for Notices {
    fn notice(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

fn plugin_dir(sounds: &[&str]) -> (TempDir, PluginPaths) {
    let dir = tempdir().unwrap();
    let paths = PluginPaths::new(dir.path());
    fs::create_dir_all(paths.assets_dir()).unwrap();
    for file in sounds {
        fs::write(paths.assets_dir().join(file), file.as_bytes()).unwrap();
    }
    (dir, paths)
}

async fn load(paths: PluginPaths) -> TickTones<SilentBackend> {
    TickTones::load(paths, || Ok(SilentBackend::new()), LogNotifier).await
}

fn plays(plugin: &TickTones<SilentBackend>) -> Vec<SoundId> {
    plugin
        .sound_manager()
        .unwrap()
        .borrow()
        .backend()
        .plays()
        .to_vec()
}

fn handle(plugin: &TickTones<SilentBackend>, name: &str) -> SoundId {
    plugin
        .sound_manager()
        .unwrap()
        .borrow()
        .handle_id(name)
        .unwrap()
}

fn write_settings(paths: &PluginPaths, json: &str) {
    fs::write(paths.settings_file(), json).unwrap();
}

#[tokio::test]
async fn checkbox_clicks_in_active_view_play_cues() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav", "pop.ogg", "notes.txt"]);
    write_settings(
        &paths,
        r#"{"untickSoundEnabled": true, "untickSound": "pop", "untickSoundVolume": 0.3}"#,
    );
    let mut plugin = load(paths).await;
    assert!(plugin.is_active());

    let mut sounds = plugin.sounds();
    sounds.sort();
    assert_eq!(sounds, vec!["Task_Completed", "pop"]);

    let (view, host) = TestView::open();
    plugin.on_layout_ready(&TestWorkspace {
        active: Some(host),
    });
    assert_eq!(view.root.len(), 1);

    view.click(EventTarget::checkbox(true));
    let tick = handle(&plugin, "Task_Completed");
    assert_eq!(plays(&plugin), vec![tick]);

    view.click(EventTarget::checkbox(false));
    let untick = handle(&plugin, "pop");
    assert_eq!(plays(&plugin), vec![tick, untick]);

    view.click(EventTarget::element("div"));
    view.click(EventTarget::Input {
        input_type: "text".to_string(),
        checked: true,
    });
    assert_eq!(plays(&plugin).len(), 2);

    let manager = plugin.sound_manager().unwrap().borrow();
    assert_eq!(manager.backend().volume(untick), Some(0.3));
}

#[tokio::test]
async fn disabled_untick_is_silent() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let mut plugin = load(paths).await;

    let (view, host) = TestView::open();
    plugin.on_active_view_change(Some(host));
    view.click(EventTarget::checkbox(false));

    assert!(plays(&plugin).is_empty());
    assert_eq!(plugin.sound_manager().unwrap().borrow().cached_count(), 0);
}

#[tokio::test]
async fn each_view_gets_one_listener() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let mut plugin = load(paths).await;

    let (a, a_host) = TestView::open();
    let (b, b_host) = TestView::open();
    plugin.on_active_view_change(Some(a_host.clone()));
    plugin.on_active_view_change(Some(b_host.clone()));
    plugin.on_active_view_change(Some(a_host));
    plugin.on_active_view_change(None);

    assert_eq!(a.root.len(), 1);
    assert_eq!(b.root.len(), 1);
    assert_eq!(plugin.registry().unwrap().len(), 2);

    // One click, one cue.
    a.click(EventTarget::checkbox(true));
    assert_eq!(plays(&plugin).len(), 1);
}

#[tokio::test]
async fn closed_view_stops_listening() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let mut plugin = load(paths).await;

    let (view, host) = TestView::open();
    plugin.on_active_view_change(Some(host.clone()));
    plugin.on_view_closed(&host);

    assert!(view.root.is_empty());
    view.click(EventTarget::checkbox(true));
    assert!(plays(&plugin).is_empty());
}

#[tokio::test]
async fn unload_detaches_all_views_and_releases_sounds() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let mut plugin = load(paths).await;

    let (a, a_host) = TestView::open();
    let (b, b_host) = TestView::open();
    plugin.on_active_view_change(Some(a_host));
    plugin.on_active_view_change(Some(b_host));
    a.click(EventTarget::checkbox(true));

    let manager = Rc::clone(plugin.sound_manager().unwrap());
    assert_eq!(manager.borrow().cached_count(), 1);

    plugin.unload();

    assert!(a.root.is_empty());
    assert!(b.root.is_empty());
    assert_eq!(manager.borrow().cached_count(), 0);
    assert_eq!(manager.borrow().backend().loaded_count(), 0);
    assert!(!plugin.is_active());

    // A second unload is harmless.
    plugin.unload();
}

#[tokio::test]
async fn unload_retries_release_when_manager_was_busy() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let mut plugin = load(paths).await;

    let (view, host) = TestView::open();
    plugin.on_active_view_change(Some(host));
    view.click(EventTarget::checkbox(true));

    let manager = Rc::clone(plugin.sound_manager().unwrap());
    {
        let _busy = manager.borrow_mut();
        plugin.unload();
    }
    assert!(view.root.is_empty());
    assert!(plugin.is_active());
    assert_eq!(manager.borrow().cached_count(), 1);

    plugin.unload();
    assert!(!plugin.is_active());
    assert_eq!(manager.borrow().cached_count(), 0);
    assert_eq!(manager.borrow().backend().loaded_count(), 0);
}

#[tokio::test]
async fn malformed_settings_leave_plugin_inert() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    write_settings(&paths, "{ this is not json");
    let mut plugin = load(paths).await;

    assert!(!plugin.is_active());
    assert_eq!(plugin.settings().tick_sound, "Task_Completed");
    assert!(plugin.sounds().is_empty());

    let (view, host) = TestView::open();
    plugin.on_layout_ready(&TestWorkspace {
        active: Some(host),
    });
    assert!(view.root.is_empty());
}

#[tokio::test]
async fn audio_failure_leaves_plugin_inert() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let mut plugin: TickTones<SilentBackend> =
        TickTones::load(paths, || Err(anyhow!("no output device")), LogNotifier).await;

    assert!(!plugin.is_active());
    let (view, host) = TestView::open();
    plugin.on_active_view_change(Some(host));
    assert!(view.root.is_empty());
}

#[tokio::test]
async fn missing_assets_folder_degrades_to_no_sounds() {
    let dir = tempdir().unwrap();
    let mut plugin = load(PluginPaths::new(dir.path())).await;
    assert!(plugin.is_active());
    assert!(plugin.sounds().is_empty());

    let (view, host) = TestView::open();
    plugin.on_active_view_change(Some(host));
    view.click(EventTarget::checkbox(true));
    assert!(plays(&plugin).is_empty());
}

#[tokio::test]
async fn random_mode_with_no_candidates_raises_notice() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    write_settings(&paths, r#"{"useRandomTickSound": true, "tickSounds": []}"#);
    let notices = Notices::default();
    let mut plugin =
        TickTones::load(paths, || Ok(SilentBackend::new()), notices.clone()).await;

    let (view, host) = TestView::open();
    plugin.on_active_view_change(Some(host));
    view.click(EventTarget::checkbox(true));

    assert!(plays(&plugin).is_empty());
    assert_eq!(*notices.0.borrow(), vec![NO_RANDOM_SOUND_NOTICE.to_string()]);
}

#[tokio::test]
async fn settings_edits_apply_to_next_click_and_persist() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav", "pop.wav"]);
    let settings_file = paths.settings_file();
    let mut plugin = load(paths).await;

    let (view, host) = TestView::open();
    plugin.on_active_view_change(Some(host));

    plugin
        .update_settings(|s| {
            s.set_sound(CueKind::Tick, "pop");
            s.set_volume(CueKind::Tick, 2.0);
        })
        .unwrap();
    view.click(EventTarget::checkbox(true));

    let pop = handle(&plugin, "pop");
    assert_eq!(plays(&plugin), vec![pop]);
    assert_eq!(
        plugin
            .sound_manager()
            .unwrap()
            .borrow()
            .backend()
            .volume(pop),
        Some(1.0)
    );

    let saved = fs::read_to_string(&settings_file).unwrap();
    assert!(saved.contains(r#""tickSound": "pop""#));
}

#[tokio::test]
async fn reload_picks_up_new_assets() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let assets = paths.assets_dir();
    let plugin = load(paths).await;
    assert_eq!(plugin.sounds(), vec!["Task_Completed"]);

    fs::write(assets.join("chime.flac"), b"flac").unwrap();
    plugin.reload_sounds().await;

    let mut sounds = plugin.sounds();
    sounds.sort();
    assert_eq!(sounds, vec!["Task_Completed", "chime"]);
}

#[tokio::test]
async fn preview_ignores_enabled_flag() {
    let (_dir, paths) = plugin_dir(&["Task_Completed.wav"]);
    let plugin = load(paths).await;
    assert!(!plugin.settings().enabled(CueKind::Untick));

    plugin.preview_sound(CueKind::Untick);

    assert_eq!(plays(&plugin), vec![handle(&plugin, "Task_Completed")]);
}

#[test]
fn plugin_paths_follow_vault_layout() {
    let paths = PluginPaths::in_vault(Path::new("/vault"), ".obsidian", "tick-tones");
    assert!(paths.assets_dir().ends_with(".obsidian/plugins/tick-tones/assets"));
}
