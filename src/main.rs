//! Pinball headless runner
//!
//! Drives the simulation at its fixed cadence with an autopilot standing in
//! for the keyboard. Snapshots can be streamed as JSON lines for an external
//! renderer.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use pinball::sim::{PcgSource, RandomSource};
use pinball::{ConfigError, Direction, Engine, GameEvent, SharedEngine, StopReason, TableConfig, Ticker};

#[derive(Debug, Parser)]
#[command(name = "pinball", about = "Headless single-table bounce game")]
struct Cli {
    /// JSON table config (defaults to the standard 300x400 table)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed; random if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Number of games to play back to back
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// Stop a round after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Tick back-to-back instead of at the configured period
    #[arg(long)]
    fast: bool,
    /// Print every snapshot as a JSON line on stdout
    #[arg(long)]
    json: bool,
    /// Autopilot reliability, 0 (never moves) to 1 (always tracks the ball)
    #[arg(long, default_value_t = 0.9)]
    skill: f64,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start thread: {0}")]
    Thread(#[from] std::io::Error),
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl RunError {
    fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(_) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let table = match &cli.config {
        Some(path) => TableConfig::load(path)?,
        None => TableConfig::default(),
    };
    let period = if cli.fast {
        Duration::ZERO
    } else {
        table.tick_period()
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Pinball (headless) starting with seed: {}", seed);

    let engine = SharedEngine::new(Engine::with_seed(table.clone(), seed)?);

    for round in 1..=cli.rounds.max(1) {
        if round > 1 {
            engine.restart();
        }
        let events = engine.subscribe();
        let ticker = Ticker::spawn(engine.clone(), period, cli.max_ticks)?;
        let pilot = Autopilot::spawn(
            engine.clone(),
            &table,
            period,
            cli.skill,
            seed.wrapping_add(u64::from(round)),
        )?;

        // Poll with a timeout: a ticker that hits its limit sends nothing more
        let wait = period.max(Duration::from_millis(10)) * 2;
        loop {
            match events.recv_timeout(wait) {
                Ok(update) => {
                    if cli.json {
                        println!("{}", update.snapshot.to_json_line()?);
                    }
                    if update.event == GameEvent::Lost {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) if ticker.is_finished() => break,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let reason = ticker.join();
        pilot.stop();
        let snap = engine.snapshot();
        log::info!("Round {} ended after {} ticks ({:?})", snap.round, snap.tick, reason);
        if !cli.json {
            let outcome = match reason {
                StopReason::Lost => "lost",
                StopReason::Limit => "survived",
                StopReason::Stopped => "stopped",
            };
            println!("round {}: {} after {} ticks", snap.round, outcome, snap.tick);
        }
    }
    Ok(())
}

/// Scripted input source: nudges the paddle under the ball from its own
/// thread, like a player holding the arrow keys.
struct Autopilot {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Autopilot {
    fn spawn(
        engine: SharedEngine,
        table: &TableConfig,
        period: Duration,
        skill: f64,
        seed: u64,
    ) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let ball_center = table.ball_size / 2;
        let paddle_center = table.paddle_width / 2;
        let dead_zone = table.paddle_step / 2;
        // Input arrives a few times per tick
        let poll = (period / 4).max(Duration::from_millis(1));

        let handle = thread::Builder::new()
            .name("pinball-autopilot".into())
            .spawn(move || {
                let mut rng = PcgSource::new(seed);
                while !flag.load(Ordering::Relaxed) {
                    let snap = engine.snapshot();
                    if snap.status == pinball::GameStatus::Lost {
                        break;
                    }
                    if rng.unit() < skill {
                        let target = snap.ball_x + ball_center - paddle_center;
                        if snap.paddle_x + dead_zone < target {
                            engine.move_paddle(Direction::Right);
                        } else if snap.paddle_x - dead_zone > target {
                            engine.move_paddle(Direction::Left);
                        }
                    }
                    thread::sleep(poll);
                }
            })?;
        Ok(Self { stop, handle })
    }

    fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        if self.handle.join().is_err() {
            log::warn!("Autopilot thread panicked");
        }
    }
}
