//! Egg Catcher entry point
//!
//! Native headless runner: plays a demo session with the autopilot under a
//! simulated host clock, logging progress, and can dump the final frame.

use std::collections::VecDeque;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use egg_catcher::input::{Key, KeyEvent};
use egg_catcher::platform::{FrameCapture, LogAudio};
use egg_catcher::sim::GamePhase;
use egg_catcher::{Game, Settings};

/// Egg Catcher headless demo
#[derive(Parser, Debug)]
#[command(version, about = "Plays a headless Egg Catcher session with the autopilot")]
struct Args {
    /// Settings JSON file (defaults are used when omitted)
    #[arg(value_name = "SETTINGS")]
    settings: Option<PathBuf>,

    /// Stop after this many host seconds (default: 120)
    #[arg(long, value_name = "SECS")]
    seconds: Option<f64>,

    /// Write the final frame as a binary PPM image
    #[arg(long, value_name = "PATH")]
    frame: Option<PathBuf>,
}

const DEFAULT_SECONDS: f64 = 120.0;
const REPORT_INTERVAL: f64 = 10.0;

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let grid = settings.grid()?;
    log::info!(
        "Grid {}x{} ({}px cells), {} Hz host ticks",
        grid.cols,
        grid.rows,
        grid.cell_size,
        settings.tick_hz
    );

    let mut game = Game::new(&settings)?;
    game.set_autopilot(true);

    let mut input: VecDeque<KeyEvent> = VecDeque::new();
    input.push_back(KeyEvent::down(Key::Confirm));
    let mut screen = FrameCapture::default();
    let mut audio = LogAudio;

    let tick = 1.0 / f64::from(settings.tick_hz.max(1));
    let limit = args.seconds.unwrap_or(DEFAULT_SECONDS);
    let mut now = 0.0;
    let mut next_report = REPORT_INTERVAL;

    while now <= limit {
        game.run_tick(now, &mut input, &mut screen, &mut audio);

        if now >= next_report {
            let state = game.state();
            log::info!(
                "t={:.0}s score={} lives={} eggs={}",
                now,
                state.score,
                state.lives,
                state.eggs.len()
            );
            next_report += REPORT_INTERVAL;
        }

        if game.phase() == GamePhase::GameOver {
            break;
        }
        now += tick;
    }

    let state = game.state();
    println!(
        "{} after {:.1}s: score {}, lives {}",
        if state.phase == GamePhase::GameOver {
            "Game over"
        } else {
            "Time up"
        },
        state.elapsed,
        state.score,
        state.lives
    );

    if let (Some(path), Some(frame)) = (&args.frame, &screen.last) {
        std::fs::write(path, frame.rasterize().to_ppm())?;
        log::info!("Wrote final frame to {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Egg Catcher (native) starting...");

    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
