//! Table configuration
//!
//! Immutable for the lifetime of an engine. Defaults are the shipped table
//! (`crate::consts`); alternative tables can be loaded from JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::geometry::{Rect, Span};

/// Upper bound for every size and speed, far below where tick arithmetic
/// could overflow `i32`
pub const MAX_DIMENSION: i32 = 1 << 20;

/// Errors raised while loading or validating a table configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read table config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse table config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid table config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Table, paddle and ball dimensions plus the restart spawn bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub width: i32,
    pub height: i32,
    /// Paddle top edge; the ball is judged once it reaches `paddle_y - ball_size`
    pub paddle_y: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_step: i32,
    pub ball_size: i32,
    /// Vertical speed magnitude set on every start
    pub ball_speed_y: i32,
    pub tick_period_ms: u64,

    pub ball_x_spawn: Span,
    pub ball_y_spawn: Span,
    pub paddle_x_spawn: Span,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            paddle_y: RACKET_Y,
            paddle_width: RACKET_WIDTH,
            paddle_height: RACKET_HEIGHT,
            paddle_step: RACKET_STEP,
            ball_size: BALL_SIZE,
            ball_speed_y: BALL_SPEED_Y,
            tick_period_ms: TICK_PERIOD_MS,

            ball_x_spawn: BALL_X_SPAWN.into(),
            ball_y_spawn: BALL_Y_SPAWN.into(),
            paddle_x_spawn: RACKET_X_SPAWN.into(),
        }
    }
}

impl TableConfig {
    /// Parse and validate a JSON table config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON table config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded table config from {} ({}x{})",
            path.display(),
            config.width,
            config.height
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_y", self.paddle_y),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("ball_size", self.ball_size),
            ("ball_speed_y", self.ball_speed_y),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
            if value > MAX_DIMENSION {
                return Err(ConfigError::invalid(
                    field,
                    format!("{value} exceeds the maximum of {MAX_DIMENSION}"),
                ));
            }
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::invalid("tick_period_ms", "must be non-zero"));
        }
        if self.paddle_width > self.width {
            return Err(ConfigError::invalid(
                "paddle_width",
                format!("{} exceeds table width {}", self.paddle_width, self.width),
            ));
        }
        let floor_bottom = self.paddle_y.checked_add(self.ball_size);
        if floor_bottom.is_none_or(|bottom| bottom > self.height) {
            return Err(ConfigError::invalid(
                "paddle_y",
                format!(
                    "floor line {} plus ball size {} exceeds table height {}",
                    self.paddle_y, self.ball_size, self.height
                ),
            ));
        }
        let paddle_bottom = self.paddle_y.checked_add(self.paddle_height);
        if paddle_bottom.is_none_or(|bottom| bottom > self.height) {
            return Err(ConfigError::invalid(
                "paddle_height",
                format!(
                    "paddle at {} with height {} reaches below the table",
                    self.paddle_y, self.paddle_height
                ),
            ));
        }
        if self.ball_speed_y > self.height {
            return Err(ConfigError::invalid(
                "ball_speed_y",
                format!("{} crosses the whole table in one tick", self.ball_speed_y),
            ));
        }
        if self.ball_size > self.width {
            return Err(ConfigError::invalid("ball_size", "wider than the table"));
        }

        Self::check_band("ball_x_spawn", self.ball_x_spawn, 0, self.wall_x_max() + 1)?;
        Self::check_band("ball_y_spawn", self.ball_y_spawn, 0, self.floor_depth())?;
        Self::check_band("paddle_x_spawn", self.paddle_x_spawn, 0, i32::MAX)?;
        Ok(())
    }

    /// A spawn band must be non-empty and lie within `[min, max)`
    fn check_band(field: &'static str, band: Span, min: i32, max: i32) -> Result<(), ConfigError> {
        if band.is_empty() {
            return Err(ConfigError::invalid(
                field,
                format!("[{}, {}) is empty", band.start, band.end),
            ));
        }
        if band.start < min || band.end > max {
            return Err(ConfigError::invalid(
                field,
                format!("[{}, {}) is outside [{min}, {max})", band.start, band.end),
            ));
        }
        Ok(())
    }

    /// Ball `y` at which the ball is level with the paddle's top edge
    #[inline]
    pub fn floor_depth(&self) -> i32 {
        self.paddle_y - self.ball_size
    }

    /// Largest ball `x` that is still inside the right wall
    #[inline]
    pub fn wall_x_max(&self) -> i32 {
        self.width - self.ball_size
    }

    /// Closed range of legal paddle left edges
    #[inline]
    pub fn paddle_x_range(&self) -> Span {
        Span::new(0, self.width - self.paddle_width)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// The whole table as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(glam::IVec2::ZERO, glam::IVec2::new(self.width, self.height))
    }
}
