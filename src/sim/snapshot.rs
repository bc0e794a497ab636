//! Read-only view handed to renderers

use serde::{Deserialize, Serialize};

use super::state::{GameState, GameStatus};

/// Immutable copy of everything a renderer needs for one frame.
///
/// Taken atomically with respect to ticks, so `ball_x` and `ball_y` always
/// come from the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball_x: i32,
    pub ball_y: i32,
    pub paddle_x: i32,
    pub status: GameStatus,
    /// Ticks since the current round started
    pub tick: u64,
    pub round: u32,
}

impl Snapshot {
    /// One JSON object, no trailing newline
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            ball_x: state.ball.pos.x,
            ball_y: state.ball.pos.y,
            paddle_x: state.paddle.x,
            status: state.status,
            tick: state.tick_count,
            round: state.round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, Paddle};
    use glam::IVec2;

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut state = GameState::new(
            Ball::new(IVec2::new(40, 25), IVec2::new(2, 12)),
            Paddle::new(120),
        );
        let snap = Snapshot::from(&state);
        state.ball.advance();
        state.paddle.x = 0;
        assert_eq!(snap.ball_x, 40);
        assert_eq!(snap.ball_y, 25);
        assert_eq!(snap.paddle_x, 120);
        assert_eq!(snap.status, GameStatus::Running);
    }

    #[test]
    fn test_json_line() {
        let state = GameState::new(Ball::new(IVec2::new(1, 2), IVec2::ZERO), Paddle::new(3));
        let json = Snapshot::from(&state).to_json_line().unwrap();
        assert_eq!(
            json,
            r#"{"ball_x":1,"ball_y":2,"paddle_x":3,"status":"Running","tick":0,"round":0}"#
        );
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.paddle_x, 3);
    }
}
