// tick-tones: command-line host for the checkbox sound cues.
//
// Loads the plugin from an Obsidian-style plugin directory and plays sounds
// directly, by cue, or by replaying a scripted workspace session.

mod host_sim;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use tick_tones_audio::{CueKind, LogNotifier};
use tick_tones_core::{
    DEFAULT_CONFIG_DIR, DEFAULT_PLUGIN_ID, PluginManifest, PluginPaths, TickTones,
};

use host_sim::SimWorkspace;

#[cfg(feature = "kira")]
type Backend = tick_tones_audio::KiraBackend;
#[cfg(not(feature = "kira"))]
type Backend = tick_tones_audio::SilentBackend;

#[cfg(feature = "kira")]
fn open_backend() -> Result<Backend> {
    tick_tones_audio::KiraBackend::new()
}

#[cfg(not(feature = "kira"))]
fn open_backend() -> Result<Backend> {
    log::warn!("Built without the `kira` feature, sounds will not be audible");
    Ok(tick_tones_audio::SilentBackend::new())
}

#[derive(Parser, Debug)]
#[command(name = "tick-tones", about = "Play sounds when checkboxes are toggled")]
struct Args {
    /// Vault root directory.
    #[arg(long, env = "TICK_TONES_VAULT", default_value = ".")]
    vault: PathBuf,

    /// Vault configuration folder name.
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config_dir: String,

    /// Plugin id, used to locate the plugin folder.
    #[arg(long, default_value = DEFAULT_PLUGIN_ID)]
    plugin_id: String,

    /// Plugin folder; overrides --vault, --config-dir and --plugin-id.
    #[arg(long)]
    plugin_dir: Option<PathBuf>,

    /// Milliseconds to keep running after triggering playback.
    #[arg(long, default_value_t = 1500)]
    linger_ms: u64,

    /// Log debug output from the tick-tones crates.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the sounds found in the assets folder.
    List,
    /// Play a sound by name.
    Play {
        name: String,
        #[arg(long, default_value_t = 1.0)]
        volume: f32,
    },
    /// Play a cue the way a checkbox click would, using the saved settings.
    Cue { kind: Cue },
    /// Replay a JSON script of view and click events.
    Simulate { script: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Cue {
    Tick,
    Untick,
}

impl From<Cue> for CueKind {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::Tick => CueKind::Tick,
            Cue::Untick => CueKind::Untick,
        }
    }
}

impl Args {
    fn paths(&self) -> PluginPaths {
        match &self.plugin_dir {
            Some(dir) => PluginPaths::new(dir),
            None => PluginPaths::in_vault(&self.vault, &self.config_dir, &self.plugin_id),
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "info,tick_tones=debug,tick_tones_audio=debug,tick_tones_core=debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let paths = args.paths();
    match PluginManifest::load_from(paths.manifest_file()) {
        Ok(manifest) => info!("{} {} ({})", manifest.name, manifest.version, manifest.id),
        Err(e) => log::debug!("No plugin manifest: {e:#}"),
    }
    info!("Plugin folder: {}", paths.plugin_dir().display());

    let mut plugin: TickTones<Backend> = TickTones::load(paths, open_backend, LogNotifier).await;
    if !plugin.is_active() {
        bail!("Plugin failed to start, see the log for details");
    }

    let played = match &args.command {
        Command::List => {
            for name in plugin.sounds() {
                println!("{name}");
            }
            false
        }
        Command::Play { name, volume } => {
            if let Some(sounds) = plugin.sound_manager() {
                sounds.borrow_mut().play_sound(name, volume.clamp(0.0, 1.0));
            }
            true
        }
        Command::Cue { kind } => {
            let policy = plugin.settings().policy();
            if let Some(sounds) = plugin.sound_manager() {
                sounds.borrow_mut().play_cue((*kind).into(), &policy);
            }
            true
        }
        Command::Simulate { script } => {
            let steps = host_sim::load_script(script)?;
            let clicks = SimWorkspace::new().run(&mut plugin, &steps).await?;
            clicks > 0
        }
    };

    if played && args.linger_ms > 0 {
        tokio::time::sleep(Duration::from_millis(args.linger_ms)).await;
    }
    plugin.unload();
    Ok(())
}
