//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::Config;

/// Coarse lifecycle of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first start
    #[default]
    Idle,
    /// Simulation active
    Running,
    /// Run over; state frozen until the next start
    Ended,
}

/// The player-controlled bird
///
/// Only the vertical axis moves. The x center is fixed by [`Config::bird_x`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Center y, playfield-relative (0 = top)
    pub y: f32,
    /// Vertical velocity in units/tick (positive = down)
    pub vy: f32,
}

impl Bird {
    /// Bird at rest in the vertical middle of the playfield
    pub fn spawn(config: &Config) -> Self {
        Self {
            y: config.height / 2.0,
            vy: 0.0,
        }
    }

    /// Bounding box
    pub fn bounds(&self, config: &Config) -> Aabb {
        Aabb::from_center(
            Vec2::new(config.bird_x, self.y),
            Vec2::new(config.bird_width, config.bird_height),
        )
    }
}

/// A gate: two blocking segments around a fixed-height gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge x
    pub x: f32,
    /// Distance from the playfield top to the top of the gap
    pub gap_top: f32,
}

impl Pipe {
    #[inline]
    pub fn right(&self, config: &Config) -> f32 {
        self.x + config.pipe_width
    }

    #[inline]
    pub fn gap_bottom(&self, config: &Config) -> f32 {
        self.gap_top + config.pipe_gap
    }

    /// Upper blocking segment
    pub fn top_rect(&self, config: &Config) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, 0.0),
            Vec2::new(self.right(config), self.gap_top),
        )
    }

    /// Lower blocking segment (down to the playfield bottom)
    pub fn bottom_rect(&self, config: &Config) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom(config)),
            Vec2::new(self.right(config), config.height),
        )
    }
}

/// Per-run and per-session counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: Phase,
    pub score: u64,
    /// Best score this session; survives restarts
    pub high_score: u64,
    pub level: u32,
    /// Timestamp (ms) of the last pipe spawn
    pub last_spawn_ms: f64,
    /// Steps taken in the current run
    pub ticks: u64,
}

impl RunState {
    pub fn new(config: &Config) -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            high_score: 0,
            level: config.min_level,
            last_spawn_ms: 0.0,
            ticks: 0,
        }
    }

    /// Reset everything but the high score for a fresh run
    pub fn reset_run(&mut self, config: &Config) {
        self.phase = Phase::Running;
        self.score = 0;
        self.level = config.min_level;
        self.last_spawn_ms = 0.0;
        self.ticks = 0;
    }
}
