//! Axis-aligned geometry for the table, ball and paddle
//!
//! Everything is in integer table units with the origin at the top-left
//! corner and `y` growing downward. Points are `glam::IVec2`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer interval on one axis.
///
/// Used both as a half-open spawn band `[start, end)` and as a closed
/// extent `[start, end]`; the query methods say which reading they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: i32,
    pub end: i32,
}

impl Span {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Number of integers in the half-open span (0 if empty)
    #[inline]
    pub fn len(&self) -> i32 {
        self.end.saturating_sub(self.start).max(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Half-open membership: `start <= v < end`
    #[inline]
    pub fn contains(&self, v: i32) -> bool {
        v >= self.start && v < self.end
    }

    /// Closed membership: `start <= v <= end`
    #[inline]
    pub fn contains_inclusive(&self, v: i32) -> bool {
        v >= self.start && v <= self.end
    }

    /// Membership with the start excluded: `start < v <= end`
    #[inline]
    pub fn contains_after_start(&self, v: i32) -> bool {
        v > self.start && v <= self.end
    }

    /// Clamp into the closed span
    #[inline]
    pub fn clamp(&self, v: i32) -> i32 {
        v.clamp(self.start, self.end)
    }
}

impl From<(i32, i32)> for Span {
    fn from((start, end): (i32, i32)) -> Self {
        Self::new(start, end)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(origin: IVec2, size: IVec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    /// Horizontal extent as a closed span `[left, right]`
    pub fn x_span(&self) -> Span {
        Span::new(self.left(), self.right())
    }
}
