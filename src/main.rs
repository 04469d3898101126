use std::{fs::OpenOptions, path::{Path, PathBuf}, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wrapsnake::config::GameConfig;
use wrapsnake::prefs::JsonPrefs;
use wrapsnake::runner::{run, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "wrapsnake", version, about = "Wrap-around snake for the terminal")]
struct Args {
    /// Start on the main screen instead of the alternate screen.
    #[arg(long)]
    windowed: bool,

    /// Disable sound cues.
    #[arg(long)]
    mute: bool,

    /// Preferences file holding the best score.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Log file; the terminal itself is used for the game.
    #[arg(long, default_value = "wrapsnake.log")]
    log: PathBuf,

    /// Seed for food placement and the star field.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the starting step interval, in milliseconds.
    #[arg(long)]
    step_ms: Option<f64>,

    /// JSON file with tuning values.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log)?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(ms) = args.step_ms {
        config.base_step_ms = ms;
        config.min_step_ms = config.min_step_ms.min(ms);
    }
    config.validate()?;

    let prefs = JsonPrefs::open(args.prefs.clone().unwrap_or_else(JsonPrefs::default_path));
    tracing::info!(path = %prefs.path().display(), "preferences");

    let opts = RunOptions { fullscreen: !args.windowed, mute: args.mute, seed: args.seed };
    run(config, prefs, opts).context("terminal session failed")?;
    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
