//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Only the engine holds a
//! `GameState` mutably; the outside world sees `Snapshot` copies.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::config::TableConfig;

/// Game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Ball in play, ticks advance it
    #[default]
    Running,
    /// Ball passed the paddle; only a restart leaves this state
    Lost,
}

/// Paddle move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Notification emitted by a tick that changed the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball advanced; redraw
    StateChanged,
    /// Ball reached the floor outside the paddle; the ticker should stop
    Lost,
}

/// The ball: top-left corner of its bounding square plus per-tick velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
}

impl Ball {
    pub fn new(pos: IVec2, vel: IVec2) -> Self {
        Self { pos, vel }
    }

    /// Bounding square for the given diameter
    pub fn bounds(&self, size: i32) -> Rect {
        Rect::new(self.pos, IVec2::splat(size))
    }

    /// Move by one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's paddle. Only `x` varies; `y` and size come from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: i32,
}

impl Paddle {
    pub fn new(x: i32) -> Self {
        Self { x }
    }

    /// Left edge of the paddle's horizontal extent
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge of the paddle's horizontal extent
    #[inline]
    pub fn right(&self, table: &TableConfig) -> i32 {
        self.x + table.paddle_width
    }

    pub fn bounds(&self, table: &TableConfig) -> Rect {
        Rect::new(
            IVec2::new(self.x, table.paddle_y),
            IVec2::new(table.paddle_width, table.paddle_height),
        )
    }

    /// Apply one move command. A move that would leave the legal range is
    /// refused outright rather than clamped. Returns whether it was applied.
    pub fn shift(&mut self, direction: Direction, table: &TableConfig) -> bool {
        let range = table.paddle_x_range();
        let target = match direction {
            Direction::Left if self.x > range.start => self.x - table.paddle_step,
            Direction::Right if self.x < range.end => self.x + table.paddle_step,
            _ => return false,
        };
        if !range.contains_inclusive(target) {
            return false;
        }
        self.x = target;
        true
    }
}

/// Complete mutable game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub paddle: Paddle,
    pub status: GameStatus,
    /// Ticks applied since the last start
    pub tick_count: u64,
    /// Number of starts so far (1 after the first)
    pub round: u32,
}

impl GameState {
    pub fn new(ball: Ball, paddle: Paddle) -> Self {
        Self {
            ball,
            paddle,
            status: GameStatus::Running,
            tick_count: 0,
            round: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
