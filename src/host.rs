//! Fixed-cadence host loop
//!
//! Drives a `SharedEngine` from a dedicated thread, one tick per period,
//! and stops itself when the ball is lost. Ticks are scheduled against
//! absolute deadlines so the time spent ticking does not stretch the
//! cadence. A new round needs a restart followed by a fresh `Ticker`.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::sim::{GameEvent, RandomSource, SharedEngine};

/// Why a ticker thread exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The ball was lost (or the game was already lost)
    Lost,
    /// `stop()` was called
    Stopped,
    /// The tick limit was reached
    Limit,
}

pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<StopReason>,
}

impl Ticker {
    /// Start ticking `engine` every `period`. A zero period ticks
    /// back-to-back. `limit` caps the number of ticks this ticker applies.
    pub fn spawn<R>(engine: SharedEngine<R>, period: Duration, limit: Option<u64>) -> io::Result<Self>
    where
        R: RandomSource + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("pinball-ticker".into())
            .spawn(move || run(&engine, period, limit, &flag))?;
        log::info!("Ticker started ({} ms period)", period.as_millis());
        Ok(Self { stop, handle })
    }

    /// Ask the thread to exit before its next tick
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the thread. A panic on the ticker thread is resumed here.
    pub fn join(self) -> StopReason {
        match self.handle.join() {
            Ok(reason) => reason,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Deadline for the tick after the one due at `due`.
///
/// Normally one period later. A ticker that has fallen a whole period
/// behind drops the missed ticks and restarts the cadence from `now`
/// instead of bursting to catch up.
fn next_deadline(due: Instant, now: Instant, period: Duration) -> Instant {
    let next = due + period;
    if next <= now { now + period } else { next }
}

fn run<R: RandomSource>(
    engine: &SharedEngine<R>,
    period: Duration,
    limit: Option<u64>,
    stop: &AtomicBool,
) -> StopReason {
    let mut ticks = 0u64;
    let mut due = Instant::now() + period;
    let reason = loop {
        if stop.load(Ordering::Relaxed) {
            break StopReason::Stopped;
        }
        if limit.is_some_and(|limit| ticks >= limit) {
            break StopReason::Limit;
        }
        if period.is_zero() {
            thread::yield_now();
        } else {
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
        }
        if stop.load(Ordering::Relaxed) {
            break StopReason::Stopped;
        }
        match engine.tick() {
            Some(GameEvent::StateChanged) => ticks += 1,
            Some(GameEvent::Lost) | None => break StopReason::Lost,
        }
        due = next_deadline(due, Instant::now(), period);
    };
    log::info!("Ticker stopped after {ticks} ticks: {reason:?}");
    reason
}
