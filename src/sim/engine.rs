//! Game state machine and the fixed-order tick
//!
//! One `step` runs physics, then the pipe generator, then collision (which may
//! end the run), then scoring. Commands are applied between steps.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::events::{CrashCause, GameEvent};
use super::input::{Command, CommandQueue};
use super::physics;
use super::score;
use super::snapshot::Snapshot;
use super::spawn;
use super::state::{Bird, Phase, Pipe, RunState};
use crate::config::{Config, ConfigError};

/// Events kept for a driver that never drains them; the oldest go first
pub const MAX_BUFFERED_EVENTS: usize = 256;

/// A single game session
///
/// Generic over the RNG that picks gap heights so tests and replays can
/// supply their own source.
#[derive(Debug, Clone)]
pub struct Engine<R = Pcg32> {
    config: Config,
    bird: Bird,
    /// Spawn order, which is also left-to-right order
    pipes: Vec<Pipe>,
    run: RunState,
    rng: R,
    events: Vec<GameEvent>,
}

impl Engine<Pcg32> {
    /// Engine with a seeded PCG generator
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Engine with a caller-supplied randomness source
    pub fn with_rng(config: Config, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bird: Bird::spawn(&config),
            pipes: Vec::new(),
            run: RunState::new(&config),
            rng,
            events: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.run.phase
    }

    pub fn score(&self) -> u64 {
        self.run.score
    }

    pub fn high_score(&self) -> u64 {
        self.run.high_score
    }

    pub fn level(&self) -> u32 {
        self.run.level
    }

    /// Steps taken in the current run
    pub fn ticks(&self) -> u64 {
        self.run.ticks
    }

    /// Begin a fresh run. Ignored while already running.
    pub fn start(&mut self) {
        if self.run.phase == Phase::Running {
            log::debug!("start() ignored: run already in progress");
            return;
        }
        self.bird = Bird::spawn(&self.config);
        self.pipes.clear();
        self.run.reset_run(&self.config);
        self.emit(GameEvent::Started);
        log::info!("Run started (high score {})", self.run.high_score);
    }

    /// Flap while running. From Idle this starts the run and flaps on the
    /// same input; from Ended it restarts without flapping.
    pub fn impulse(&mut self) {
        match self.run.phase {
            Phase::Running => self.flap(),
            Phase::Idle => {
                self.start();
                self.flap();
            }
            Phase::Ended => self.start(),
        }
    }

    fn flap(&mut self) {
        physics::flap(&mut self.bird, self.config.flap_velocity);
        self.emit(GameEvent::Flapped);
    }

    /// Apply a single command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Impulse => self.impulse(),
        }
    }

    /// Apply every queued command in arrival order
    pub fn drain_commands(&mut self, queue: &mut CommandQueue) {
        for command in queue.drain() {
            self.apply(command);
        }
    }

    /// Advance one tick. No-op unless running.
    pub fn step(&mut self, timestamp_ms: f64) {
        if self.run.phase != Phase::Running {
            return;
        }
        self.run.ticks += 1;

        physics::integrate(&mut self.bird, self.config.gravity);

        if let Some(pipe) = spawn::advance(
            &mut self.pipes,
            &mut self.run.last_spawn_ms,
            timestamp_ms,
            self.run.level,
            &mut self.rng,
            &self.config,
        ) {
            self.emit(GameEvent::Spawned {
                gap_top: pipe.gap_top,
            });
        }

        if let Some(cause) = collision::detect(&self.bird, &self.pipes, &self.config) {
            self.end_run(cause);
            return;
        }

        score::score_passed(
            &mut self.pipes,
            &mut self.run,
            &self.config,
            &mut self.events,
        );
        self.trim_events();

        log::trace!(
            "tick {} y={:.1} vy={:.1} pipes={} score={}",
            self.run.ticks,
            self.bird.y,
            self.bird.vy,
            self.pipes.len(),
            self.run.score
        );
    }

    fn end_run(&mut self, cause: CrashCause) {
        let score = self.run.score;
        self.run.phase = Phase::Ended;
        self.emit(GameEvent::Crashed { cause, score });
        log::info!(
            "Run ended by {:?} after {} ticks, score {}",
            cause,
            self.run.ticks,
            score
        );

        if score > self.run.high_score {
            self.run.high_score = score;
            self.emit(GameEvent::NewHighScore { score });
            log::info!("New high score: {score}");
        }
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.run.phase,
            bird: self.bird,
            pipes: self.pipes.clone(),
            score: self.run.score,
            high_score: self.run.high_score,
            level: self.run.level,
            ticks: self.run.ticks,
        }
    }

    /// Take the events produced since the last call.
    ///
    /// At most [`MAX_BUFFERED_EVENTS`] are held between calls.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
        self.trim_events();
    }

    fn trim_events(&mut self) {
        if self.events.len() > MAX_BUFFERED_EVENTS {
            let excess = self.events.len() - MAX_BUFFERED_EVENTS;
            self.events.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running() -> Engine {
        let mut engine = Engine::new(Config::default(), 42).unwrap();
        engine.start();
        engine.take_events();
        engine
    }

    #[test]
    fn test_new_is_idle() {
        let engine = Engine::new(Config::default(), 1).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.high_score, 0);
        assert_eq!(snap.level, 1);
        assert!(snap.pipes.is_empty());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = Config {
            pipe_gap: 900.0,
            ..Default::default()
        };
        assert!(matches!(
            Engine::new(config, 1),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_first_step_from_rest() {
        let mut engine = running();
        engine.step(16.0);
        let snap = engine.snapshot();
        assert_eq!(snap.bird.vy, 0.5);
        assert_eq!(snap.bird.y, 300.0);
        assert_eq!(snap.ticks, 1);
    }

    #[test]
    fn test_step_is_noop_unless_running() {
        let mut engine = Engine::new(Config::default(), 1).unwrap();
        let before = engine.snapshot();
        engine.step(5000.0);
        assert_eq!(engine.snapshot(), before);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_idle_impulse_starts_and_flaps() {
        let mut engine = Engine::new(Config::default(), 1).unwrap();
        engine.impulse();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.snapshot().bird, Bird { y: 300.0, vy: -10.0 });
        assert_eq!(
            engine.take_events(),
            vec![GameEvent::Started, GameEvent::Flapped]
        );

        engine.step(16.0);
        // First frame moves up, not down
        assert_eq!(engine.snapshot().bird.y, 290.0);
    }

    #[test]
    fn test_running_impulse_overrides_velocity() {
        let mut engine = running();
        engine.bird.vy = 6.5;
        engine.impulse();
        assert_eq!(engine.snapshot().bird.vy, -10.0);
        assert_eq!(engine.snapshot().bird.y, 300.0);
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut engine = running();
        engine.run.score = 4;
        engine.start();
        assert_eq!(engine.score(), 4);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_gap_keeps_bird_alive() {
        let mut engine = running();
        engine.pipes.push(Pipe {
            x: 30.0,
            gap_top: 200.0,
        });
        engine.step(16.0);
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_top_segment_ends_run() {
        let mut engine = running();
        engine.pipes.push(Pipe {
            x: 30.0,
            gap_top: 290.0,
        });
        engine.step(16.0);
        assert_eq!(engine.phase(), Phase::Ended);
        assert_eq!(
            engine.take_events(),
            vec![GameEvent::Crashed {
                cause: CrashCause::Pipe,
                score: 0
            }]
        );
    }

    #[test]
    fn test_ground_ends_run_in_same_step() {
        let mut engine = running();
        engine.bird = Bird { y: 560.0, vy: 6.0 };
        engine.step(16.0);
        assert_eq!(engine.phase(), Phase::Ended);
        assert!(engine.take_events().contains(&GameEvent::Crashed {
            cause: CrashCause::Ground,
            score: 0
        }));
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut engine = running();
        engine.bird = Bird { y: 20.0, vy: -10.0 };
        engine.step(16.0);
        assert_eq!(engine.phase(), Phase::Ended);
    }

    #[test]
    fn test_pass_scores_on_the_crossing_tick() {
        let mut engine = running();
        // Right edge 42 -> 39 this tick, crossing bird_x = 40
        engine.pipes.push(Pipe {
            x: -18.0,
            gap_top: 200.0,
        });

        engine.step(16.0);
        assert_eq!(engine.score(), 1);
        assert!(engine.snapshot().pipes.is_empty());
        assert!(engine.take_events().contains(&GameEvent::Scored { score: 1 }));

        engine.step(32.0);
        assert_eq!(engine.score(), 1);
        assert!(engine.snapshot().pipes.is_empty());
    }

    #[test]
    fn test_fastest_allowed_scroll_still_scores() {
        // Top-level speed 39.25 sits just under bird_x = 40
        let config = Config {
            base_scroll_speed: 38.0,
            scroll_speed_per_level: 0.25,
            ..Default::default()
        };
        let mut engine = Engine::new(config, 9).unwrap();
        engine.start();
        // Right edge 40 -> 1.75 this tick: passed but still on screen
        engine.pipes.push(Pipe {
            x: -20.0,
            gap_top: 200.0,
        });

        engine.step(16.0);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.score(), 1);
        assert!(engine.snapshot().pipes.is_empty());
    }

    #[test]
    fn test_end_state_is_frozen() {
        let mut engine = running();
        engine.bird = Bird { y: 570.0, vy: 2.0 };
        engine.step(16.0);
        let frozen = engine.snapshot();

        engine.step(32.0);
        engine.step(5000.0);
        assert_eq!(engine.snapshot(), frozen);
    }

    #[test]
    fn test_high_score_across_runs() {
        let mut engine = running();
        engine.run.score = 5;
        engine.bird.y = 570.0;
        engine.step(16.0);
        assert_eq!(engine.high_score(), 5);
        assert!(engine
            .take_events()
            .contains(&GameEvent::NewHighScore { score: 5 }));

        // Restart via impulse: no flap on restart
        engine.impulse();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snapshot().bird.vy, 0.0);

        engine.run.score = 2;
        engine.bird.y = 570.0;
        engine.step(16.0);
        assert_eq!(engine.high_score(), 5);
        assert!(!engine
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::NewHighScore { .. })));
    }

    #[test]
    fn test_start_resets_run_state() {
        let mut engine = running();
        engine.run.score = 31;
        engine.run.level = 4;
        engine.run.last_spawn_ms = 9000.0;
        engine.pipes.push(Pipe {
            x: 100.0,
            gap_top: 100.0,
        });
        engine.bird = Bird { y: 575.0, vy: 9.0 };
        engine.step(9016.0);
        assert_eq!(engine.phase(), Phase::Ended);

        engine.apply(Command::Start);
        let snap = engine.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.high_score, 31);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.ticks, 0);
        assert!(snap.pipes.is_empty());
        assert_eq!(snap.bird, Bird { y: 300.0, vy: 0.0 });
        assert_eq!(engine.run.last_spawn_ms, 0.0);
    }

    #[test]
    fn test_queued_commands_apply_in_order() {
        let mut engine = Engine::new(Config::default(), 3).unwrap();
        let mut queue = CommandQueue::new();
        queue.push(Command::Start);
        queue.push(Command::Impulse);
        engine.drain_commands(&mut queue);

        assert!(queue.is_empty());
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.snapshot().bird.vy, -10.0);
    }

    #[test]
    fn test_spawns_use_the_timestamp() {
        let mut engine = running();
        engine.step(1400.0);
        assert!(engine.snapshot().pipes.is_empty());
        engine.step(1517.0);
        let snap = engine.snapshot();
        assert_eq!(snap.pipes.len(), 1);
        assert_eq!(snap.pipes[0].x, 397.0);
        assert_eq!(engine.run.last_spawn_ms, 1517.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = running();
        let mut b = running();
        for tick in 1..400u64 {
            if tick % 18 == 0 {
                a.impulse();
                b.impulse();
            }
            let t = tick as f64 * crate::consts::TICK_MS;
            a.step(t);
            b.step(t);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    /// Always yields zero bits
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_custom_rng_source() {
        let mut engine = Engine::with_rng(Config::default(), ZeroRng).unwrap();
        engine.start();
        engine.step(2000.0);
        // A zero sample puts the gap right at the top margin
        assert_eq!(engine.snapshot().pipes[0].gap_top, 50.0);
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut engine = running();
        for tick in 1..=10_000u64 {
            if tick % 15 == 0 {
                engine.impulse();
            }
            engine.step(tick as f64 * crate::consts::TICK_MS);
            assert!(engine.events.len() <= MAX_BUFFERED_EVENTS);
        }
        assert_eq!(engine.events.len(), MAX_BUFFERED_EVENTS);

        // Newest event survives the trim
        engine.impulse();
        assert!(matches!(
            engine.events.last(),
            Some(GameEvent::Flapped | GameEvent::Started)
        ));
    }

    #[test]
    fn test_snapshot_serializes() {
        let engine = running();
        let json = engine.snapshot().to_json().unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"high_score\":0"));
    }

    proptest! {
        #[test]
        fn prop_every_tick_integrates(flaps in proptest::collection::vec(any::<bool>(), 1..120)) {
            let mut engine = running();
            for (i, flap) in flaps.into_iter().enumerate() {
                if engine.phase() != Phase::Running {
                    break;
                }
                if flap {
                    engine.impulse();
                }
                let before = engine.snapshot().bird;
                engine.step(i as f64 * crate::consts::TICK_MS);
                let after = engine.snapshot().bird;
                prop_assert_eq!(after.y, before.y + before.vy);
                prop_assert_eq!(after.vy, before.vy + engine.config().gravity);
            }
        }

        #[test]
        fn prop_score_never_decreases(seed in any::<u64>(), period in 12u64..30) {
            let mut engine = Engine::new(Config::default(), seed).unwrap();
            engine.start();
            let mut last = 0;
            for tick in 1..1500u64 {
                if tick % period == 0 {
                    engine.impulse();
                }
                engine.step(tick as f64 * crate::consts::TICK_MS);
                prop_assert!(engine.score() >= last);
                prop_assert!(engine.level() <= engine.config().max_level);
                last = engine.score();
                if engine.phase() == Phase::Ended {
                    prop_assert!(engine.high_score() >= engine.score());
                    break;
                }
            }
        }
    }
}
