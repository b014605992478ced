//! Scoring and difficulty escalation

use super::events::GameEvent;
use super::state::{Pipe, RunState};
use crate::config::Config;

/// Count and remove every pipe whose right edge is behind the bird's center.
///
/// Each pass is scored on its own, so a tick that clears several pipes still
/// hits every threshold multiple on the way. Events go into `events`.
/// Returns the number of pipes passed.
pub fn score_passed(
    pipes: &mut Vec<Pipe>,
    run: &mut RunState,
    config: &Config,
    events: &mut Vec<GameEvent>,
) -> usize {
    let before = pipes.len();
    pipes.retain(|pipe| {
        if pipe.right(config) < config.bird_x {
            run.score += 1;
            events.push(GameEvent::Scored { score: run.score });
            log::debug!("Passed pipe, score {}", run.score);
            if let Some(level) = level_up(run, config) {
                events.push(GameEvent::LevelUp { level });
            }
            false
        } else {
            true
        }
    });
    before - pipes.len()
}

/// Raise the level if the score just reached a threshold multiple.
///
/// Returns the new level when it changed. Clamped at `max_level`.
pub fn level_up(run: &mut RunState, config: &Config) -> Option<u32> {
    if run.score == 0 || run.score % config.level_threshold != 0 {
        return None;
    }
    let next = (run.level + 1).min(config.max_level);
    if next == run.level {
        return None;
    }
    run.level = next;
    log::info!("Difficulty raised to level {next} at score {}", run.score);
    Some(next)
}
