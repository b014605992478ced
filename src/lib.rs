//! Flap Engine - simulation core for a side-scrolling gate runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, gates, collisions, scoring, game state)
//! - `config`: Construction-time tuning with validation
//!
//! Rendering and input binding live outside this crate. They read
//! [`sim::Snapshot`] and feed [`sim::Command`]s back in.

pub mod config;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{Config, ConfigError};
pub use sim::{Engine, Phase, Snapshot};

/// Default tuning constants
pub mod consts {
    /// Nominal tick rate the physics constants are tuned for
    pub const TICK_HZ: f64 = 60.0;
    /// Milliseconds per nominal tick
    pub const TICK_MS: f64 = 1000.0 / TICK_HZ;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Ground strip along the bottom edge
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Bird defaults - fixed x, the world scrolls past it
    pub const BIRD_X: f32 = 40.0;
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 30.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_GAP: f32 = 200.0;
    /// Minimum distance between the gap and the playfield edges
    pub const GAP_MARGIN_TOP: f32 = 50.0;
    pub const GAP_MARGIN_BOTTOM: f32 = 50.0;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity assigned by a flap (negative = up)
    pub const FLAP_VELOCITY: f32 = -10.0;

    /// Horizontal scroll (units/tick)
    pub const BASE_SCROLL_SPEED: f32 = 2.0;
    pub const SCROLL_SPEED_PER_LEVEL: f32 = 1.0;

    /// Time between pipe spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;

    /// Difficulty goes up every this many points
    pub const LEVEL_THRESHOLD: u64 = 10;
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 5;
}
