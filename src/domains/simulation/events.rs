use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimulationEvent {
    PathsLoaded {
        run_id: Uuid,
        agent_count: usize,
        timestamp: DateTime<Utc>,
    },
    SimulationStarted {
        run_id: Uuid,
        timestamp: DateTime<Utc>,
    },
    SimulationPaused {
        run_id: Uuid,
        cursor: usize,
        timestamp: DateTime<Utc>,
    },
    StepAdvanced {
        run_id: Uuid,
        cursor: usize,
        moved_agents: usize,
        timestamp: DateTime<Utc>,
    },
    SimulationCompleted {
        run_id: Uuid,
        steps: usize,
        timestamp: DateTime<Utc>,
    },
    SimulationReset {
        run_id: Uuid,
        agent_count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for SimulationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SimulationEvent::PathsLoaded { .. } => "PathsLoaded",
            SimulationEvent::SimulationStarted { .. } => "SimulationStarted",
            SimulationEvent::SimulationPaused { .. } => "SimulationPaused",
            SimulationEvent::StepAdvanced { .. } => "StepAdvanced",
            SimulationEvent::SimulationCompleted { .. } => "SimulationCompleted",
            SimulationEvent::SimulationReset { .. } => "SimulationReset",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SimulationEvent::PathsLoaded { timestamp, .. } => *timestamp,
            SimulationEvent::SimulationStarted { timestamp, .. } => *timestamp,
            SimulationEvent::SimulationPaused { timestamp, .. } => *timestamp,
            SimulationEvent::StepAdvanced { timestamp, .. } => *timestamp,
            SimulationEvent::SimulationCompleted { timestamp, .. } => *timestamp,
            SimulationEvent::SimulationReset { timestamp, .. } => *timestamp,
        }
    }
}
