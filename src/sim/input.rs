//! Player commands and the queue that serializes them with ticks

use serde::{Deserialize, Serialize};

/// Commands the engine understands.
/// Input binding (keys, pointer) happens outside; this is the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Begin a run (from Idle or Ended)
    Start,
    /// Flap, or start/restart when not running
    Impulse,
}

/// A queue of pending commands.
/// Event handlers push into it; the driver drains it between ticks.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Take all pending commands in arrival order
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
