//! Headless flock runner.
//!
//! ```text
//! murmur-runner [config.json] [--ticks N] [--drag] [--svg out.svg] [--png out.png]
//! ```
//!
//! Loads a configuration (or uses the defaults), optionally drags the
//! pointer across the middle of the world, advances the flock and writes the
//! final frame. Set `RUST_LOG=debug` for per-spawn logging.

use murmur::export::{save_png, save_svg};
use murmur::prelude::*;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 300;

// Ticks spent dragging when --drag is given
const DRAG_TICKS: u64 = 60;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    ticks: Option<u64>,
    drag: bool,
    svg: Option<PathBuf>,
    png: Option<PathBuf>,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut args = Args::default();
        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--ticks" => {
                    let value = raw.next().ok_or("--ticks needs a value")?;
                    let ticks = value
                        .parse()
                        .map_err(|_| format!("invalid tick count: {}", value))?;
                    args.ticks = Some(ticks);
                }
                "--drag" => args.drag = true,
                "--svg" => args.svg = Some(raw.next().ok_or("--svg needs a path")?.into()),
                "--png" => args.png = Some(raw.next().ok_or("--png needs a path")?.into()),
                "-h" | "--help" => return Err(usage()),
                flag if flag.starts_with("--") => return Err(format!("unknown flag: {}", flag)),
                path if args.config.is_none() => args.config = Some(path.into()),
                extra => return Err(format!("unexpected argument: {}", extra)),
            }
        }
        Ok(args)
    }
}

fn usage() -> String {
    "usage: murmur-runner [config.json] [--ticks N] [--drag] [--svg out.svg] [--png out.png]"
        .to_string()
}

/// Advance `flock` by `ticks`, dragging through the middle for the first
/// [`DRAG_TICKS`] of them when `drag` is set.
fn simulate(flock: &mut Flock, ticks: u64, drag: bool) {
    let bounds = flock.bounds();
    let drag_ticks = if drag { DRAG_TICKS.min(ticks) } else { 0 };

    for t in 0..ticks {
        if t < drag_ticks {
            // Sweep left to right through the middle
            let x = bounds.x * (0.25 + 0.5 * t as f32 / DRAG_TICKS as f32);
            let y = bounds.y / 2.0;
            if t == 0 {
                flock.begin_interaction(x, y);
            } else {
                flock.continue_interaction(x, y);
            }
        } else if t == drag_ticks && drag {
            flock.end_interaction();
        }
        flock.tick();
    }

    // Short runs end mid-drag
    if flock.pointer().is_held() {
        flock.end_interaction();
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            FlockConfig::load(path)?
        }
        None => FlockConfig::default(),
    };
    let mut flock = Flock::new(config);
    let Vec2 { x: width, y: height } = flock.bounds();

    simulate(&mut flock, args.ticks.unwrap_or(DEFAULT_TICKS), args.drag);

    let agents = flock.agents();
    let mean_speed = if agents.is_empty() {
        0.0
    } else {
        agents.iter().map(|a| a.velocity.length()).sum::<f32>() / agents.len() as f32
    };
    info!(
        ticks = flock.tick_count(),
        population = agents.len(),
        mean_speed,
        "simulation finished"
    );

    if let Some(path) = &args.svg {
        save_svg(path, &agents, flock.display(), width, height)?;
        info!(path = %path.display(), "wrote svg");
    }
    if let Some(path) = &args.png {
        save_png(path, &agents, flock.display(), width, height)?;
        info!(path = %path.display(), "wrote png");
    }

    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
