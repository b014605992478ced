//! Demo/attract mode - a simple policy that plays the game
//!
//! Holds a line just above the bottom of the next gap. The bird flaps once it
//! has stopped rising and is about to drop below that line.

use super::input::Command;
use super::snapshot::Snapshot;
use super::state::Phase;
use crate::config::Config;

/// Clearance kept above the bottom of the gap
pub const GAP_FLOOR_CLEARANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Lowest y the bird should sink to right now
    pub fn hold_line(snapshot: &Snapshot, config: &Config) -> f32 {
        let bird_left = config.bird_x - config.bird_width / 2.0;
        snapshot
            .pipes
            .iter()
            .find(|p| p.right(config) >= bird_left)
            .map(|p| p.gap_bottom(config) - GAP_FLOOR_CLEARANCE)
            .unwrap_or(config.height / 2.0)
    }

    /// Command to issue before the next tick, if any
    pub fn decide(&self, snapshot: &Snapshot, config: &Config) -> Option<Command> {
        match snapshot.phase {
            Phase::Idle | Phase::Ended => Some(Command::Start),
            Phase::Running => {
                let line = Self::hold_line(snapshot, config);
                let bird = snapshot.bird;
                (bird.vy >= 0.0 && bird.y + bird.vy > line).then_some(Command::Impulse)
            }
        }
    }
}
