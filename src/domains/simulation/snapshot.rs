use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::agent::Agent;
use crate::domains::grid::{Grid, GridCoord};
use crate::domains::path_planning::DronePath;
use crate::domains::telemetry::Telemetry;
use crate::domains::visualization::CameraView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationState {
    #[default]
    Idle,
    Running,
}

/// Whole-value view of the path simulation. A new one is produced after
/// every change; holders never observe partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub run_id: Uuid,
    pub state: SimulationState,
    pub grid: Grid,
    pub agents: Vec<Agent>,
    pub paths: Vec<DronePath>,
    pub cursor: usize,
    pub visited_cells: Vec<GridCoord>,
    pub telemetry: Telemetry,
    pub connection_radius: f64,
    pub camera_view: CameraView,
    pub selected_agent: Option<u32>,
    pub collision_avoidance: bool,
}

impl SimulationSnapshot {
    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn agent(&self, id: u32) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Steps left before the first agent's path runs out.
    pub fn remaining_steps(&self) -> usize {
        self.paths
            .first()
            .map_or(0, |path| path.len().saturating_sub(self.cursor))
    }
}
