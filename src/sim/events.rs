//! Events emitted by the engine for presentation and audio layers

use serde::{Deserialize, Serialize};

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Ceiling,
    Ground,
    Pipe,
}

/// Something noteworthy that happened during a command or tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    Started,
    /// The bird received an impulse
    Flapped,
    /// A pipe entered at the right edge
    Spawned { gap_top: f32 },
    /// A pipe was passed; carries the new score
    Scored { score: u64 },
    /// Difficulty went up
    LevelUp { level: u32 },
    /// The run ended
    Crashed { cause: CrashCause, score: u64 },
    /// The finished run beat the session best
    NewHighScore { score: u64 },
}
