//! Uniform random sources for game start
//!
//! The engine only needs two draws: a unit ratio and an integer from a
//! half-open band. Production uses a seeded PCG; tests script exact values.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::Span;

/// Source of uniform draws used by `start()`
pub trait RandomSource {
    /// Uniform in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Uniform integer in the half-open `band`. Callers guarantee it is non-empty.
    fn in_band(&mut self, band: Span) -> i32;
}

/// Seeded PCG generator (reproducible per seed)
#[derive(Debug, Clone)]
pub struct PcgSource {
    seed: u64,
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fresh generator with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for PcgSource {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn in_band(&mut self, band: Span) -> i32 {
        self.rng.random_range(band.start..band.end)
    }
}

/// One scripted draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Unit(f64),
    Int(i32),
}

/// Replays a fixed sequence of draws, in the order `start()` consumes them:
/// ratio, ball y, ball x, paddle x.
///
/// Panics when the script runs out or a draw has the wrong kind; it is a
/// test fixture, and a short script is a bug in the test.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    draws: VecDeque<Draw>,
}

impl SequenceSource {
    pub fn new(draws: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Script for one `start()`
    pub fn start(ratio: f64, ball_y: i32, ball_x: i32, paddle_x: i32) -> Self {
        let mut source = Self::default();
        source.push_start(ratio, ball_y, ball_x, paddle_x);
        source
    }

    /// Append the draws for another `start()`
    pub fn push_start(&mut self, ratio: f64, ball_y: i32, ball_x: i32, paddle_x: i32) {
        self.draws.extend([
            Draw::Unit(ratio),
            Draw::Int(ball_y),
            Draw::Int(ball_x),
            Draw::Int(paddle_x),
        ]);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for SequenceSource {
    fn unit(&mut self) -> f64 {
        match self.draws.pop_front() {
            Some(Draw::Unit(v)) => v,
            other => panic!("scripted source expected a unit draw, got {other:?}"),
        }
    }

    fn in_band(&mut self, _band: Span) -> i32 {
        match self.draws.pop_front() {
            Some(Draw::Int(v)) => v,
            other => panic!("scripted source expected an integer draw, got {other:?}"),
        }
    }
}
