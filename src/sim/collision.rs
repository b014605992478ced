//! Collision detection
//!
//! Everything is axis-aligned: the bird box against the ceiling, the ground
//! surface and the two blocking segments of every pipe it overlaps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::CrashCause;
use super::state::{Bird, Pipe};
use crate::config::Config;

/// Axis-aligned box, `min` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Open-interval overlap on the x axis (touching edges do not overlap)
    #[inline]
    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.max.x > min_x && self.min.x < max_x
    }
}

/// Which boundary, if any, the bird box touches
pub fn bounds_collision(bird: &Aabb, config: &Config) -> Option<CrashCause> {
    if bird.min.y <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if bird.max.y >= config.floor_y() {
        Some(CrashCause::Ground)
    } else {
        None
    }
}

/// Whether the bird box hits either blocking segment of a pipe
///
/// Only pipes sharing the bird's horizontal band can hit. Inside the band the
/// bird must sit fully within the gap.
pub fn pipe_collision(bird: &Aabb, pipe: &Pipe, config: &Config) -> bool {
    if !bird.overlaps_x(pipe.x, pipe.right(config)) {
        return false;
    }
    bird.min.y < pipe.gap_top || bird.max.y > pipe.gap_bottom(config)
}

/// Full per-tick check. Boundaries win over pipes when both apply.
pub fn detect(bird: &Bird, pipes: &[Pipe], config: &Config) -> Option<CrashCause> {
    let bounds = bird.bounds(config);
    if let Some(cause) = bounds_collision(&bounds, config) {
        return Some(cause);
    }
    pipes
        .iter()
        .any(|pipe| pipe_collision(&bounds, pipe, config))
        .then_some(CrashCause::Pipe)
}

/// Predicate form of [`detect`]
#[inline]
pub fn collides(bird: &Bird, pipes: &[Pipe], config: &Config) -> bool {
    detect(bird, pipes, config).is_some()
}
