//! Pipe generation, scrolling and retirement

use rand::Rng;

use super::state::Pipe;
use crate::config::Config;

/// Draw a gap top uniformly from `[margin_top, margin_top + span)`
pub fn random_gap_top<R: Rng>(rng: &mut R, config: &Config) -> f32 {
    let u: f32 = rng.random();
    let gap_top = config.gap_margin_top + u * config.gap_span();
    let upper = config.gap_margin_top + config.gap_span();
    if gap_top >= upper {
        // f32 rounding landed on the excluded bound; step one ulp down
        f32::from_bits(upper.to_bits() - 1)
    } else {
        gap_top
    }
}

/// Spawn when due, scroll every pipe left, drop the ones fully off-screen.
///
/// Returns the freshly spawned pipe, if any.
pub fn advance<R: Rng>(
    pipes: &mut Vec<Pipe>,
    last_spawn_ms: &mut f64,
    timestamp_ms: f64,
    level: u32,
    rng: &mut R,
    config: &Config,
) -> Option<Pipe> {
    let spawned = if timestamp_ms - *last_spawn_ms > config.spawn_interval_ms {
        let pipe = Pipe {
            x: config.width,
            gap_top: random_gap_top(rng, config),
        };
        pipes.push(pipe);
        *last_spawn_ms = timestamp_ms;
        log::debug!("Spawned pipe at t={timestamp_ms:.0}ms, gap_top={:.1}", pipe.gap_top);
        Some(pipe)
    } else {
        None
    };

    let speed = config.scroll_speed(level);
    for pipe in pipes.iter_mut() {
        pipe.x -= speed;
    }
    pipes.retain(|p| p.right(config) > 0.0);

    spawned
}
