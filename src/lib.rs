//! Pinball - a single-table bounce game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, collisions, game status)
//! - `config`: Table dimensions and spawn bands, loaded from JSON
//! - `host`: Fixed-cadence ticker that drives the simulation

pub mod config;
pub mod host;
pub mod sim;

pub use config::{ConfigError, TableConfig};
pub use host::{StopReason, Ticker};
pub use sim::{Direction, Engine, GameEvent, GameStatus, SharedEngine, Snapshot, Update};

/// Game configuration constants
pub mod consts {
    /// Fixed logical tick (milliseconds)
    pub const TICK_PERIOD_MS: u64 = 100;

    /// Table dimensions
    pub const TABLE_WIDTH: i32 = 300;
    pub const TABLE_HEIGHT: i32 = 400;

    /// Paddle defaults - top edge doubles as the floor line
    pub const RACKET_Y: i32 = 340;
    pub const RACKET_HEIGHT: i32 = 20;
    pub const RACKET_WIDTH: i32 = 60;
    /// Distance covered by one move command
    pub const RACKET_STEP: i32 = 10;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 16;
    /// Vertical speed magnitude (units per tick); only its sign ever changes
    pub const BALL_SPEED_Y: i32 = 12;

    /// Spawn bands, half-open `[start, end)`
    pub const BALL_X_SPAWN: (i32, i32) = (20, 220);
    pub const BALL_Y_SPAWN: (i32, i32) = (20, 30);
    pub const RACKET_X_SPAWN: (i32, i32) = (0, 200);
}
