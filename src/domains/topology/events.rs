use super::transmissions::Transmission;
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TopologyEvent {
    TopologyGenerated {
        node_count: usize,
        edge_count: usize,
        timestamp: DateTime<Utc>,
    },
    TransmissionRecorded {
        transmission: Transmission,
    },
    TransmissionsStarted {
        timestamp: DateTime<Utc>,
    },
    TransmissionsStopped {
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for TopologyEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TopologyEvent::TopologyGenerated { .. } => "TopologyGenerated",
            TopologyEvent::TransmissionRecorded { .. } => "TransmissionRecorded",
            TopologyEvent::TransmissionsStarted { .. } => "TransmissionsStarted",
            TopologyEvent::TransmissionsStopped { .. } => "TransmissionsStopped",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TopologyEvent::TopologyGenerated { timestamp, .. } => *timestamp,
            TopologyEvent::TransmissionRecorded { transmission } => transmission.timestamp,
            TopologyEvent::TransmissionsStarted { timestamp } => *timestamp,
            TopologyEvent::TransmissionsStopped { timestamp } => *timestamp,
        }
    }
}
