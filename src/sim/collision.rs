//! Collision decisions for one tick
//!
//! Pure functions over the pre-advance ball position. The comparisons are
//! deliberately not complementary at the paddle edges: a ball exactly on
//! the paddle's left edge is neither lost nor bounced.

use super::state::{Ball, Paddle};
use crate::config::TableConfig;

/// What happens on the vertical axis this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    /// Ball is at paddle depth and outside the paddle
    Lost,
    /// Ball is at or above the ceiling
    Ceiling,
    /// Ball is below paddle depth and over the paddle
    Paddle,
    /// Nothing to resolve
    Free,
}

impl Vertical {
    /// Whether the vertical speed flips
    #[inline]
    pub fn bounces(&self) -> bool {
        matches!(self, Vertical::Ceiling | Vertical::Paddle)
    }
}

/// Result of resolving one tick's collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Horizontal speed flips
    pub side_wall: bool,
    pub vertical: Vertical,
}

/// Ball touches or is past the left or right wall
#[inline]
pub fn hits_side_wall(ball: &Ball, table: &TableConfig) -> bool {
    let ball = ball.bounds(table.ball_size);
    let walls = table.bounds();
    ball.left() <= walls.left() || ball.right() >= walls.right()
}

/// Ball reached paddle depth while strictly outside the paddle's extent
#[inline]
pub fn is_past_paddle(ball: &Ball, paddle: &Paddle, table: &TableConfig) -> bool {
    let ball = ball.bounds(table.ball_size);
    let paddle = paddle.bounds(table);
    ball.bottom() >= paddle.top() && !paddle.x_span().contains_inclusive(ball.left())
}

/// Ball touches or is above the ceiling
#[inline]
pub fn hits_ceiling(ball: &Ball, table: &TableConfig) -> bool {
    ball.pos.y <= table.bounds().top()
}

/// Ball is strictly below paddle depth and within `(left, right]` of the paddle
#[inline]
pub fn hits_paddle(ball: &Ball, paddle: &Paddle, table: &TableConfig) -> bool {
    let ball = ball.bounds(table.ball_size);
    let paddle = paddle.bounds(table);
    ball.bottom() > paddle.top() && paddle.x_span().contains_after_start(ball.left())
}

/// Decide the vertical outcome; loss takes priority over any bounce
pub fn resolve_vertical(ball: &Ball, paddle: &Paddle, table: &TableConfig) -> Vertical {
    if is_past_paddle(ball, paddle, table) {
        Vertical::Lost
    } else if hits_ceiling(ball, table) {
        Vertical::Ceiling
    } else if hits_paddle(ball, paddle, table) {
        Vertical::Paddle
    } else {
        Vertical::Free
    }
}

/// Resolve both axes for the current (pre-advance) position
pub fn resolve(ball: &Ball, paddle: &Paddle, table: &TableConfig) -> Resolution {
    Resolution {
        side_wall: hits_side_wall(ball, table),
        vertical: resolve_vertical(ball, paddle, table),
    }
}
