//! memtree-gestures - replay recorded hand landmarks through the gesture engine.
//!
//! Prints one s-expression per line: events as they fire, snapshots as
//! they are published, and a final status line.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tracing::info;

use memtree_gestures::engine::{GestureEvent, GestureHandler, GestureSnapshot};
use memtree_gestures::{replay, GestureConfig, ScriptedSource, TrackingController};

#[derive(Parser, Debug)]
#[command(name = "memtree-gestures", version, about = "Hand-gesture classifier for the memory tree")]
struct Cli {
    /// Config overrides as a keyword plist, e.g. (:pinch-threshold 0.05)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a frame script through the engine
    Replay {
        /// Script of (:t MS :hand POINTS) forms
        script: PathBuf,

        /// Print every frame's snapshot, not only throttled ones
        #[arg(long)]
        all_snapshots: bool,
    },
    /// Print the effective configuration and exit
    Config,
}

/// Writes events and published snapshots to stdout.
struct SexpPrinter;

impl GestureHandler for SexpPrinter {
    fn on_select(&mut self) {
        println!("{}", GestureEvent::Select.to_sexp());
    }

    fn on_index_move(&mut self, x: f32, y: f32) {
        println!("{}", GestureEvent::IndexMove { x, y }.to_sexp());
    }

    fn on_delta_move(&mut self, dx: f32, dy: f32) {
        println!("{}", GestureEvent::DeltaMove { dx, dy }.to_sexp());
    }

    fn on_five_finger_zoom(&mut self, delta: f32) {
        println!("{}", GestureEvent::FiveFingerZoom { delta }.to_sexp());
    }

    fn on_scroll_move(&mut self, y: f32) {
        println!("{}", GestureEvent::ScrollMove { y }.to_sexp());
    }

    fn on_snapshot(&mut self, snapshot: &GestureSnapshot) {
        println!("{}", snapshot.to_sexp());
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GestureConfig> {
    let mut config = GestureConfig::default();
    if let Some(path) = path {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read {}: {}", path.display(), e))?;
        let value = lexpr::from_str(&text)
            .map_err(|e| anyhow!("failed to parse {}: {}", path.display(), e))?;
        config
            .apply_sexp(&value)
            .map_err(|e| anyhow!("{}: {}", path.display(), e))?;
        info!("Loaded config overrides from {}", path.display());
    }
    Ok(config)
}

fn run_replay(script: &Path, config: GestureConfig, all_snapshots: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(script)
        .map_err(|e| anyhow!("failed to read {}: {}", script.display(), e))?;
    let frames =
        replay::parse_script(&text).map_err(|e| anyhow!("{}: {}", script.display(), e))?;
    info!("Replaying {} frames from {}", frames.len(), script.display());

    let mut controller = TrackingController::new(ScriptedSource::new(frames), config);
    controller.enable()?;

    let mut printer = SexpPrinter;
    while let Some(output) = controller.pump(&mut printer) {
        if all_snapshots && !output.published {
            printer.on_snapshot(&output.snapshot);
        }
    }

    if let Some(engine) = controller.engine() {
        println!("{}", engine.status_sexp());
    }
    controller.disable();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memtree_gestures=info".into()),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay {
            script,
            all_snapshots,
        } => run_replay(&script, config, all_snapshots),
        Command::Config => {
            println!("{}", config.config_sexp());
            Ok(())
        }
    }
}
