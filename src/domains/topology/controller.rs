use chrono::Utc;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::aggregate::Topology;
use super::events::TopologyEvent;
use super::transmissions::{simulate_transmission, Transmission, TransmissionLog};

/// Immutable view of the topology generator handed to consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub topology: Topology,
    pub transmissions: Vec<Transmission>,
    pub is_simulating: bool,
}

/// Owns the topology generator state. Mutated only through its methods;
/// readers get `TopologySnapshot` values.
pub struct TopologyController {
    topology: Topology,
    log: TransmissionLog,
    simulating: bool,
    rng: StdRng,
}

impl TopologyController {
    pub fn new(log_capacity: usize, rng: StdRng) -> Self {
        Self {
            topology: Topology::empty(),
            log: TransmissionLog::new(log_capacity),
            simulating: false,
            rng,
        }
    }

    /// Replace the topology and clear the transmission log.
    pub fn generate(&mut self, node_count: usize) -> TopologyEvent {
        self.topology = Topology::generate(node_count, &mut self.rng);
        self.log.clear();
        TopologyEvent::TopologyGenerated {
            node_count: self.topology.len(),
            edge_count: self.topology.edge_count(),
            timestamp: Utc::now(),
        }
    }

    /// One transmission tick. Does nothing for a source without neighbors.
    pub fn tick(&mut self) -> Option<TopologyEvent> {
        let transmission = simulate_transmission(&self.topology, &mut self.rng)?;
        self.log.record(transmission.clone());
        Some(TopologyEvent::TransmissionRecorded { transmission })
    }

    /// Tick from the transmission timer. A no-op once simulation is switched
    /// off.
    pub fn timer_tick(&mut self) -> Option<TopologyEvent> {
        if !self.simulating {
            return None;
        }
        self.tick()
    }

    pub fn set_simulating(&mut self, simulating: bool) {
        self.simulating = simulating;
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn transmissions(&self) -> &TransmissionLog {
        &self.log
    }

    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            topology: self.topology.clone(),
            transmissions: self.log.to_vec(),
            is_simulating: self.simulating,
        }
    }
}
