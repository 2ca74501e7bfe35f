use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domains::grid::GridCoord;

pub const INITIAL_BATTERY: u8 = 100;
pub const INITIAL_TEMPERATURE: f64 = 25.0;
/// Temperature moves by at most this much, either way, per step.
pub const TEMPERATURE_JITTER: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u32,
    pub position: GridCoord,
    pub battery: u8,
    pub temperature: f64,
}

/// Partial agent state as sent by the network feed. Absent fields keep the
/// agent's current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPatch {
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub battery: Option<u8>,
    pub temperature: Option<f64>,
}

impl Agent {
    /// Fresh agent parked at the origin.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            position: GridCoord::ORIGIN,
            battery: INITIAL_BATTERY,
            temperature: INITIAL_TEMPERATURE,
        }
    }

    /// `count` fresh agents numbered from 1.
    pub fn roster(count: usize) -> Vec<Agent> {
        (1..=count as u32).map(Agent::new).collect()
    }

    /// The agent after one step onto `to`: one battery unit spent (floored at
    /// zero) and a small random temperature drift.
    pub fn moved_to<R: Rng + ?Sized>(&self, to: GridCoord, rng: &mut R) -> Agent {
        Agent {
            id: self.id,
            position: to,
            battery: self.battery.saturating_sub(1),
            temperature: self.temperature + rng.gen_range(-TEMPERATURE_JITTER..TEMPERATURE_JITTER),
        }
    }

    pub fn patched(&self, patch: &AgentPatch) -> Agent {
        Agent {
            id: self.id,
            position: GridCoord::new(
                patch.x.unwrap_or(self.position.x),
                patch.y.unwrap_or(self.position.y),
            ),
            battery: patch.battery.unwrap_or(self.battery),
            temperature: patch.temperature.unwrap_or(self.temperature),
        }
    }
}
