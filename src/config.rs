//! Engine configuration
//!
//! Fixed at construction. A JSON file only needs the fields it overrides;
//! everything else falls back to [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Geometry or tuning that the simulation cannot run with
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("flap_velocity must point upward (negative), got {0}")]
    FlapNotUpward(f32),

    #[error("level_threshold must be at least 1")]
    ZeroThreshold,

    #[error("min_level {min} exceeds max_level {max}")]
    LevelRange { min: u32, max: u32 },

    #[error("ground height {ground} leaves no playfield in height {height}")]
    GroundTooTall { ground: f32, height: f32 },

    #[error(
        "gap {gap} with margins {top}/{bottom} does not fit in playfield height {height}"
    )]
    GapDoesNotFit {
        gap: f32,
        top: f32,
        bottom: f32,
        height: f32,
    },

    #[error("bottom gap margin {bottom} must clear the ground strip {ground}")]
    GapIntoGround { bottom: f32, ground: f32 },

    #[error("bird height {bird} must be smaller than the gap {gap}")]
    BirdTallerThanGap { bird: f32, gap: f32 },

    #[error("scroll speed {speed} at the top level must stay below bird_x {bird_x}")]
    ScrollOutrunsBird { speed: f32, bird_x: f32 },

    #[error("bird spans x {left}..{right}, outside playfield width {width}")]
    BirdOutsideField { left: f32, right: f32, width: f32 },
}

/// Construction-time constants for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Ground strip height; the bottom boundary sits at `height - ground_height`
    pub ground_height: f32,

    // === Bird ===
    /// Fixed horizontal center
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,

    // === Physics (per tick) ===
    pub gravity: f32,
    pub flap_velocity: f32,
    pub base_scroll_speed: f32,
    pub scroll_speed_per_level: f32,

    // === Cadence / difficulty ===
    pub spawn_interval_ms: f64,
    pub level_threshold: u64,
    pub min_level: u32,
    pub max_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            gap_margin_top: GAP_MARGIN_TOP,
            gap_margin_bottom: GAP_MARGIN_BOTTOM,

            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            base_scroll_speed: BASE_SCROLL_SPEED,
            scroll_speed_per_level: SCROLL_SPEED_PER_LEVEL,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            level_threshold: LEVEL_THRESHOLD,
            min_level: MIN_LEVEL,
            max_level: MAX_LEVEL,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Width of the range `gap_top` is drawn from
    #[inline]
    pub fn gap_span(&self) -> f32 {
        self.height - self.pipe_gap - self.gap_margin_top - self.gap_margin_bottom
    }

    /// Scroll speed (units/tick) at a difficulty level
    #[inline]
    pub fn scroll_speed(&self, level: u32) -> f32 {
        self.base_scroll_speed + level as f32 * self.scroll_speed_per_level
    }

    /// Check every geometric invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width as f64)?;
        positive("height", self.height as f64)?;
        non_negative("ground_height", self.ground_height as f64)?;
        positive("bird_width", self.bird_width as f64)?;
        positive("bird_height", self.bird_height as f64)?;
        positive("pipe_width", self.pipe_width as f64)?;
        positive("pipe_gap", self.pipe_gap as f64)?;
        positive("gap_margin_top", self.gap_margin_top as f64)?;
        positive("gap_margin_bottom", self.gap_margin_bottom as f64)?;
        positive("gravity", self.gravity as f64)?;
        positive("base_scroll_speed", self.base_scroll_speed as f64)?;
        non_negative("scroll_speed_per_level", self.scroll_speed_per_level as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;

        if !(self.flap_velocity.is_finite() && self.flap_velocity < 0.0) {
            return Err(ConfigError::FlapNotUpward(self.flap_velocity));
        }
        if self.level_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.min_level > self.max_level {
            return Err(ConfigError::LevelRange {
                min: self.min_level,
                max: self.max_level,
            });
        }
        if self.ground_height >= self.height {
            return Err(ConfigError::GroundTooTall {
                ground: self.ground_height,
                height: self.height,
            });
        }
        if self.gap_span() <= 0.0 {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.pipe_gap,
                top: self.gap_margin_top,
                bottom: self.gap_margin_bottom,
                height: self.height,
            });
        }
        if self.gap_margin_bottom < self.ground_height {
            return Err(ConfigError::GapIntoGround {
                bottom: self.gap_margin_bottom,
                ground: self.ground_height,
            });
        }
        if self.bird_height >= self.pipe_gap {
            return Err(ConfigError::BirdTallerThanGap {
                bird: self.bird_height,
                gap: self.pipe_gap,
            });
        }
        let left = self.bird_x - self.bird_width / 2.0;
        let right = self.bird_x + self.bird_width / 2.0;
        if !self.bird_x.is_finite() || left < 0.0 || right > self.width {
            return Err(ConfigError::BirdOutsideField {
                left,
                right,
                width: self.width,
            });
        }
        // A pipe must spend at least one tick with its right edge in (0, bird_x)
        // so it is scored before it drops off-screen
        let top_speed = self.scroll_speed(self.max_level);
        if !top_speed.is_finite() || top_speed >= self.bird_x {
            return Err(ConfigError::ScrollOutrunsBird {
                speed: top_speed,
                bird_x: self.bird_x,
            });
        }

        Ok(())
    }
}
