//! Thread-safe engine handle
//!
//! The ticker and the input source usually live on different threads. All
//! access goes through one mutex held for the whole command, and state
//! leaves only as `Snapshot` copies. Every notification carries the
//! snapshot taken under the same lock as the command that produced it, and
//! is queued before the lock is released, so subscribers see updates in
//! command order. Lock order is always engine, then subscribers.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::engine::Engine;
use super::rng::{PcgSource, RandomSource};
use super::snapshot::Snapshot;
use super::state::{Direction, GameEvent, GameStatus};

/// One notification: what happened, and the state right after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub event: GameEvent,
    pub snapshot: Snapshot,
}

pub struct SharedEngine<R = PcgSource> {
    engine: Arc<Mutex<Engine<R>>>,
    subscribers: Arc<Mutex<Vec<Sender<Update>>>>,
}

impl<R> Clone for SharedEngine<R> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<R: RandomSource> SharedEngine<R> {
    pub fn new(engine: Engine<R>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    // No critical section can panic halfway through a mutation, so a
    // poisoned lock still guards a consistent engine.
    fn lock(&self) -> MutexGuard<'_, Engine<R>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Receive every notification from now on. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> Receiver<Update> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    // Called with the engine lock held. `Sender::send` never blocks.
    fn notify(&self, update: Update) {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(update).is_ok());
    }

    /// Advance one tick.
    ///
    /// Must not be called while another `tick` is running for the same game;
    /// the lock serializes such calls but a host that overlaps ticks has a
    /// broken cadence. Use one `Ticker`.
    pub fn tick(&self) -> Option<GameEvent> {
        let mut engine = self.lock();
        let event = engine.tick()?;
        self.notify(Update {
            event,
            snapshot: engine.snapshot(),
        });
        Some(event)
    }

    pub fn move_paddle(&self, direction: Direction) -> bool {
        self.lock().move_paddle(direction)
    }

    /// Reinitialize ball, paddle and status in one step
    pub fn start(&self) {
        let mut engine = self.lock();
        engine.start();
        self.notify(Update {
            event: GameEvent::StateChanged,
            snapshot: engine.snapshot(),
        });
    }

    pub fn restart(&self) {
        self.start();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn status(&self) -> GameStatus {
        self.lock().status()
    }

    /// Run `f` with the engine locked. For hosts that need a consistent
    /// read of more than a snapshot.
    pub fn with_engine<T>(&self, f: impl FnOnce(&Engine<R>) -> T) -> T {
        f(&self.lock())
    }
}
