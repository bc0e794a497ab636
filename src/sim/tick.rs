//! Fixed-interval simulation tick
//!
//! One call advances the game by one logical tick. Bounce decisions are
//! made on the position the ball had before this tick moves it.

use super::collision::{self, Vertical};
use super::state::{GameEvent, GameState, GameStatus};
use crate::config::TableConfig;

/// Advance the game state by one tick.
///
/// Returns the notification for the caller to forward, or `None` when the
/// game is already lost and the tick is a no-op.
pub fn tick(state: &mut GameState, table: &TableConfig) -> Option<GameEvent> {
    if state.status == GameStatus::Lost {
        return None;
    }

    let resolution = collision::resolve(&state.ball, &state.paddle, table);

    // Side walls flip x even on the losing tick
    if resolution.side_wall {
        state.ball.vel.x = -state.ball.vel.x;
        log::debug!("Wall bounce at x={} (vx now {})", state.ball.pos.x, state.ball.vel.x);
    }

    match resolution.vertical {
        Vertical::Lost => {
            state.status = GameStatus::Lost;
            log::info!(
                "Ball lost after {} ticks: ball=({}, {}) paddle x={}",
                state.tick_count,
                state.ball.pos.x,
                state.ball.pos.y,
                state.paddle.x
            );
            return Some(GameEvent::Lost);
        }
        Vertical::Ceiling | Vertical::Paddle => {
            state.ball.vel.y = -state.ball.vel.y;
            log::debug!(
                "{:?} bounce at ({}, {}) (vy now {})",
                resolution.vertical,
                state.ball.pos.x,
                state.ball.pos.y,
                state.ball.vel.y
            );
        }
        Vertical::Free => {}
    }

    state.ball.advance();
    state.tick_count += 1;
    Some(GameEvent::StateChanged)
}
