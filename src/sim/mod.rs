//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One fixed tick per call, integer units only
//! - Randomness only through an injected `RandomSource`
//! - No rendering, windowing or timing dependencies

pub mod collision;
pub mod engine;
pub mod geometry;
pub mod rng;
pub mod shared;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Resolution, Vertical, resolve};
pub use engine::Engine;
pub use geometry::{Rect, Span};
pub use rng::{Draw, PcgSource, RandomSource, SequenceSource};
pub use shared::{SharedEngine, Update};
pub use snapshot::Snapshot;
pub use state::{Ball, Direction, GameEvent, GameState, GameStatus, Paddle};
pub use tick::tick;
