//! Game engine: owns the state and exposes the four game commands
//!
//! `Engine` is single-threaded; every mutator takes `&mut self`, so two
//! ticks can never overlap. Wrap it in `SharedEngine` to drive it from a
//! ticker thread and an input thread at once.

use glam::IVec2;

use super::rng::{PcgSource, RandomSource};
use super::snapshot::Snapshot;
use super::state::{Ball, Direction, GameEvent, GameState, GameStatus, Paddle};
use super::tick;
use crate::config::{ConfigError, TableConfig};

pub struct Engine<R = PcgSource> {
    table: TableConfig,
    state: GameState,
    rng: R,
}

impl Engine<PcgSource> {
    /// Engine with a random seed, already started
    pub fn new(table: TableConfig) -> Result<Self, ConfigError> {
        Self::with_source(table, PcgSource::from_entropy())
    }

    /// Reproducible engine, already started
    pub fn with_seed(table: TableConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(table, PcgSource::new(seed))
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> Engine<R> {
    /// Engine drawing from `rng`, already started
    pub fn with_source(table: TableConfig, rng: R) -> Result<Self, ConfigError> {
        let mut engine = Self::from_state(
            table,
            GameState::new(Ball::new(IVec2::ZERO, IVec2::ZERO), Paddle::new(0)),
            rng,
        )?;
        engine.start();
        Ok(engine)
    }

    /// Resume from an existing state without re-randomizing it.
    ///
    /// The table is validated; the state is taken as given.
    pub fn from_state(table: TableConfig, state: GameState, rng: R) -> Result<Self, ConfigError> {
        table.validate()?;
        Ok(Self { table, state, rng })
    }

    /// Start a new round: fresh ball, fresh paddle, status `Running`
    pub fn start(&mut self) {
        let table = &self.table;
        let ratio = self.rng.unit() - 0.5;
        let vy = table.ball_speed_y;
        let vx = (f64::from(vy) * ratio * 2.0).round() as i32;

        let ball_y = self.rng.in_band(table.ball_y_spawn);
        let ball_x = self.rng.in_band(table.ball_x_spawn);
        let paddle_x = table
            .paddle_x_range()
            .clamp(self.rng.in_band(table.paddle_x_spawn));

        let round = self.state.round + 1;
        self.state = GameState {
            ball: Ball::new(IVec2::new(ball_x, ball_y), IVec2::new(vx, vy)),
            paddle: Paddle::new(paddle_x),
            status: GameStatus::Running,
            tick_count: 0,
            round,
        };

        log::info!(
            "Round {} started: ball=({}, {}) vel=({}, {}) paddle x={}",
            round,
            ball_x,
            ball_y,
            vx,
            vy,
            paddle_x
        );
    }

    /// Same as `start`; reads better after a loss
    pub fn restart(&mut self) {
        self.start();
    }

    /// Advance one tick. `None` while lost.
    pub fn tick(&mut self) -> Option<GameEvent> {
        tick::tick(&mut self.state, &self.table)
    }

    /// Apply one paddle move command. Returns whether the paddle moved;
    /// refused moves and moves while lost are silent no-ops.
    pub fn move_paddle(&mut self, direction: Direction) -> bool {
        if self.state.status == GameStatus::Lost {
            return false;
        }
        let moved = self.state.paddle.shift(direction, &self.table);
        if !moved {
            log::trace!("Paddle move {:?} refused at x={}", direction, self.state.paddle.x);
        }
        moved
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn table(&self) -> &TableConfig {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceSource;
    use proptest::prelude::*;

    fn scripted(ratio: f64, ball_y: i32, ball_x: i32, paddle_x: i32) -> Engine<SequenceSource> {
        Engine::with_source(
            TableConfig::default(),
            SequenceSource::start(ratio, ball_y, ball_x, paddle_x),
        )
        .unwrap()
    }

    fn placed(ball: (i32, i32), vel: (i32, i32), paddle_x: i32) -> Engine<SequenceSource> {
        Engine::from_state(
            TableConfig::default(),
            GameState::new(
                Ball::new(IVec2::new(ball.0, ball.1), IVec2::new(vel.0, vel.1)),
                Paddle::new(paddle_x),
            ),
            SequenceSource::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_start_uses_drawn_values() {
        // ratio 0.75 -> r = 0.25 -> vx = round(12 * 0.25 * 2) = 6
        let engine = scripted(0.75, 25, 100, 150);
        let state = engine.state();
        assert_eq!(state.ball.pos, IVec2::new(100, 25));
        assert_eq!(state.ball.vel, IVec2::new(6, 12));
        assert_eq!(state.paddle.x, 150);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.round, 1);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn test_start_horizontal_speed_extremes() {
        // ratio 0.0 -> r = -0.5 -> vx = -12
        let engine = scripted(0.0, 20, 20, 0);
        assert_eq!(engine.state().ball.vel.x, -12);

        // ratio 0.5 -> r = 0 -> vx = 0
        let engine = scripted(0.5, 20, 20, 0);
        assert_eq!(engine.state().ball.vel.x, 0);

        // ratio 0.6 -> r = 0.1 -> 2.4 rounds to 2
        let engine = scripted(0.6, 20, 20, 0);
        assert_eq!(engine.state().ball.vel.x, 2);
    }

    #[test]
    fn test_start_clamps_paddle_into_table() {
        let table = TableConfig {
            width: 220,
            ball_x_spawn: (20, 200).into(),
            ..TableConfig::default()
        };
        table.validate().unwrap();
        // Paddle band is still [0, 200) but the right limit is 160
        let engine = Engine::with_source(table, SequenceSource::start(0.5, 20, 20, 199)).unwrap();
        assert_eq!(engine.state().paddle.x, 160);
    }

    #[test]
    fn test_restart_after_loss() {
        let mut source = SequenceSource::start(0.5, 20, 20, 100);
        source.push_start(0.25, 29, 219, 10);
        let mut engine = Engine::with_source(TableConfig::default(), source).unwrap();

        // Fall straight down on the left of the paddle until lost
        let mut ticks = 0;
        while engine.tick() == Some(GameEvent::StateChanged) {
            ticks += 1;
            assert!(ticks < 100, "ball never reached the floor");
        }
        assert_eq!(engine.status(), GameStatus::Lost);

        engine.restart();
        let state = engine.state();
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.ball.pos, IVec2::new(219, 29));
        assert_eq!(state.ball.vel, IVec2::new(-6, 12));
        assert_eq!(state.paddle.x, 10);
        assert_eq!(state.round, 2);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn test_constructors_reject_invalid_table() {
        let table = TableConfig {
            ball_x_spawn: (200, 200).into(),
            ..TableConfig::default()
        };
        let err = Engine::with_seed(table.clone(), 7).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "ball_x_spawn", .. }));

        let state = GameState::new(Ball::new(IVec2::ZERO, IVec2::ZERO), Paddle::new(0));
        let err = Engine::from_state(table, state, SequenceSource::default()).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "ball_x_spawn", .. }));
    }

    #[test]
    fn test_double_start_rerandomizes() {
        let mut engine = Engine::with_seed(TableConfig::default(), 1234).unwrap();
        let first = engine.state().clone();
        engine.start();
        engine.start();
        let third = engine.state();
        assert_eq!(third.status, GameStatus::Running);
        assert_eq!(third.round, first.round + 2);
        assert_eq!(engine.seed(), 1234);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Engine::with_seed(TableConfig::default(), 99).unwrap();
        let mut b = Engine::with_seed(TableConfig::default(), 99).unwrap();
        for i in 0..200 {
            let dir = if i % 3 == 0 { Direction::Left } else { Direction::Right };
            a.move_paddle(dir);
            b.move_paddle(dir);
            assert_eq!(a.tick(), b.tick());
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn test_scenario_side_bounce() {
        let mut engine = placed((0, 100), (-5, 10), 0);
        engine.tick();
        assert_eq!(engine.state().ball.vel.x, 5);
        assert_eq!(engine.snapshot().ball_x, 5);
    }

    #[test]
    fn test_scenario_loss() {
        let mut engine = placed((49, 324), (3, 12), 50);
        assert_eq!(engine.tick(), Some(GameEvent::Lost));
        let snap = engine.snapshot();
        assert_eq!(snap.status, GameStatus::Lost);
        assert_eq!((snap.ball_x, snap.ball_y), (49, 324));
    }

    #[test]
    fn test_scenario_paddle_bounce() {
        let mut engine = placed((60, 325), (0, 10), 50);
        engine.tick();
        assert_eq!(engine.state().ball.vel.y, -10);
        assert_eq!(engine.status(), GameStatus::Running);
    }

    #[test]
    fn test_scenario_ceiling_bounce() {
        let mut engine = placed((100, 0), (0, -10), 0);
        engine.tick();
        assert_eq!(engine.state().ball.vel.y, 10);
        assert_eq!(engine.snapshot().ball_y, 10);
    }

    #[test]
    fn test_paddle_edge_asymmetry() {
        // Left edge at paddle depth: neither lost nor bounced
        let mut engine = placed((50, 324), (0, 10), 50);
        assert_eq!(engine.tick(), Some(GameEvent::StateChanged));
        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.state().ball.vel.y, 10);

        // Left edge below paddle depth: still neither
        let mut engine = placed((50, 330), (0, 10), 50);
        engine.tick();
        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.state().ball.vel.y, 10);

        // Right edge below paddle depth: bounces
        let mut engine = placed((110, 330), (0, 10), 50);
        engine.tick();
        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.state().ball.vel.y, -10);

        // One past the right edge: lost
        let mut engine = placed((111, 324), (0, 10), 50);
        engine.tick();
        assert_eq!(engine.status(), GameStatus::Lost);
    }

    #[test]
    fn test_move_paddle_edges() {
        let mut engine = placed((100, 100), (0, 10), 0);
        assert!(!engine.move_paddle(Direction::Left));
        assert_eq!(engine.snapshot().paddle_x, 0);

        let mut engine = placed((100, 100), (0, 10), 240);
        assert!(!engine.move_paddle(Direction::Right));
        assert_eq!(engine.snapshot().paddle_x, 240);
        assert!(engine.move_paddle(Direction::Left));
        assert_eq!(engine.snapshot().paddle_x, 230);
    }

    #[test]
    fn test_move_paddle_ignored_while_lost() {
        let mut engine = placed((10, 330), (0, 10), 100);
        assert_eq!(engine.tick(), Some(GameEvent::Lost));
        assert!(!engine.move_paddle(Direction::Left));
        assert_eq!(engine.snapshot().paddle_x, 100);
        assert_eq!(engine.tick(), None);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_table(
            seed in any::<u64>(),
            moves in proptest::collection::vec(any::<bool>(), 0..200),
        ) {
            let mut engine = Engine::with_seed(TableConfig::default(), seed).unwrap();
            let range = engine.table().paddle_x_range();
            prop_assert!(range.contains_inclusive(engine.snapshot().paddle_x));
            for right in moves {
                let dir = if right { Direction::Right } else { Direction::Left };
                engine.move_paddle(dir);
                prop_assert!(range.contains_inclusive(engine.snapshot().paddle_x));
            }
        }

        #[test]
        fn prop_running_tick_advances_by_velocity(seed in any::<u64>(), ticks in 1usize..300) {
            let mut engine = Engine::with_seed(TableConfig::default(), seed).unwrap();
            for _ in 0..ticks {
                let before = engine.state().ball.pos;
                match engine.tick() {
                    Some(GameEvent::StateChanged) => {
                        let after = engine.state().ball;
                        prop_assert_eq!(after.pos, before + after.vel);
                    }
                    Some(GameEvent::Lost) => {
                        prop_assert_eq!(engine.state().ball.pos, before);
                        break;
                    }
                    None => prop_assert!(false, "tick returned None while running"),
                }
            }
        }

        #[test]
        fn prop_start_stays_in_bands(seed in any::<u64>(), restarts in 1usize..8) {
            let mut engine = Engine::with_seed(TableConfig::default(), seed).unwrap();
            for _ in 0..restarts {
                engine.restart();
                let table = engine.table().clone();
                let state = engine.state();
                prop_assert_eq!(state.status, GameStatus::Running);
                prop_assert!(table.ball_x_spawn.contains(state.ball.pos.x));
                prop_assert!(table.ball_y_spawn.contains(state.ball.pos.y));
                prop_assert_eq!(state.ball.vel.y, table.ball_speed_y);
                prop_assert!(state.ball.vel.x.abs() <= table.ball_speed_y);
                prop_assert!(table.paddle_x_range().contains_inclusive(state.paddle.x));
            }
        }
    }
}
