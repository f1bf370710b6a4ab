//! Cavern entry point
//!
//! Runs the game headless: the demo autopilot supplies input, sounds go to
//! a silent backend, and the last frame can be written out as JSON.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use cavern::audio::{AudioManager, NullBackend};
use cavern::demo::Autopilot;
use cavern::input::InputTracker;
use cavern::{App, Settings};

/// Headless Cavern runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the run (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Settings file
    #[arg(long, default_value = "cavern-settings.json")]
    settings: PathBuf,

    /// Write the final render frame to this file as JSON
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    env_logger::Builder::from_env(env).init();

    let settings = Settings::load_from(&args.settings);
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);

    let mut audio = AudioManager::new(Box::new(NullBackend));
    audio.apply_settings(&settings);

    let mut app = App::new(seed, audio);
    let mut pilot = Autopilot::new(seed ^ 0x5eed);
    let mut tracker = InputTracker::new();

    for _ in 0..args.frames {
        let input = tracker.capture(pilot.next_input(&app));
        app.update(&input);
    }

    let world = app.world();
    match world.player.as_ref() {
        Some(player) => log::info!(
            "After {} frames: level {}, score {}, lives {}",
            args.frames,
            world.level + 1,
            player.score,
            player.lives
        ),
        None => log::info!("After {} frames: on the title screen", args.frames),
    }

    if let Some(path) = args.dump {
        let json = serde_json::to_string_pretty(&app.frame())?;
        fs::write(&path, json)?;
        log::info!("Wrote final frame to {}", path.display());
    }

    Ok(())
}
