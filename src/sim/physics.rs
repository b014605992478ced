//! Vertical motion of the bird
//!
//! Semi-implicit ordering: position advances with the velocity from before
//! this tick's gravity is applied.

use super::state::Bird;

/// Advance one tick under constant gravity
#[inline]
pub fn integrate(bird: &mut Bird, gravity: f32) {
    bird.y += bird.vy;
    bird.vy += gravity;
}

/// Instant upward kick; position is untouched
#[inline]
pub fn flap(bird: &mut Bird, flap_velocity: f32) {
    bird.vy = flap_velocity;
}
