//! Flap Engine headless driver
//!
//! Plays autopilot runs on a fixed 60 Hz clock and reports the results.
//! Usage: `flap-engine [seed] [runs] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use thiserror::Error;

    use flap_engine::consts::TICK_MS;
    use flap_engine::sim::{Autopilot, Command, CommandQueue, Engine, GameEvent, Phase};
    use flap_engine::{Config, ConfigError};

    /// Ticks before a run is cut off (10 minutes of play)
    const MAX_TICKS_PER_RUN: u64 = 60 * 60 * 10;

    #[derive(Debug, Error)]
    pub enum DriverError {
        #[error("invalid argument: {0}")]
        BadArg(String),
        #[error("cannot read config: {0}")]
        ReadConfig(#[source] std::io::Error),
        #[error(transparent)]
        Config(#[from] ConfigError),
    }

    struct Args {
        seed: u64,
        runs: u32,
        config: Config,
    }

    fn parse_args() -> Result<Args, DriverError> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s.parse().map_err(|_| DriverError::BadArg(s))?,
            None => 0xF1A9,
        };
        let runs = match args.next() {
            Some(s) => s.parse().map_err(|_| DriverError::BadArg(s))?,
            None => 3,
        };
        let config = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path).map_err(DriverError::ReadConfig)?;
                log::info!("Loaded config from {path}");
                Config::from_json(&json)?
            }
            None => Config::default(),
        };
        Ok(Args { seed, runs, config })
    }

    pub fn run() -> Result<(), DriverError> {
        let args = parse_args()?;
        let mut engine = Engine::new(args.config, args.seed)?;
        let mut queue = CommandQueue::new();
        let pilot = Autopilot;

        log::info!("Seed {}, {} run(s)", args.seed, args.runs);

        // One shared clock across runs, like a display refresh would be
        let mut clock_ticks: u64 = 0;
        for run in 1..=args.runs {
            queue.push(Command::Start);
            engine.drain_commands(&mut queue);

            let mut flaps = 0u32;
            while engine.phase() == Phase::Running && engine.ticks() < MAX_TICKS_PER_RUN {
                if let Some(cmd) = pilot.decide(&engine.snapshot(), engine.config()) {
                    queue.push(cmd);
                }
                engine.drain_commands(&mut queue);

                clock_ticks += 1;
                engine.step(clock_ticks as f64 * TICK_MS);

                flaps += engine
                    .take_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::Flapped))
                    .count() as u32;
            }

            let snap = engine.snapshot();
            let outcome = match snap.phase {
                Phase::Ended => "crashed",
                _ => "timed out",
            };
            println!(
                "run {run}: {outcome} after {} ticks, score {}, level {}, {flaps} flaps",
                snap.ticks, snap.score, snap.level
            );
            if let Ok(json) = snap.to_json() {
                log::debug!("final snapshot: {json}");
            }

            // A run that never ended cannot be restarted
            if snap.phase == Phase::Running {
                log::warn!("Run {run} hit the tick limit, skipping remaining runs");
                break;
            }
        }

        println!("high score: {}", engine.high_score());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flap Engine (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flap_engine::wasm, this is just to satisfy the compiler
}
