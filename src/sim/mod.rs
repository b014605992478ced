//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Injected, seedable RNG only
//! - Stable pipe order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod events;
pub mod input;
pub mod physics;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod state;

pub use autopilot::Autopilot;
pub use collision::{Aabb, collides, detect};
pub use engine::Engine;
pub use events::{CrashCause, GameEvent};
pub use input::{Command, CommandQueue};
pub use snapshot::Snapshot;
pub use state::{Bird, Phase, Pipe, RunState};
