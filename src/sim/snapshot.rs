//! Read-only view of the engine for renderers

use serde::{Deserialize, Serialize};

use super::state::{Bird, Phase, Pipe};

/// Owned copy of everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub bird: Bird,
    /// Left-to-right (spawn order)
    pub pipes: Vec<Pipe>,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub ticks: u64,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
