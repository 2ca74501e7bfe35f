use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::aggregate::Topology;

pub const DEFAULT_TRANSMISSION_LOG_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transmission {
    pub from: usize,
    pub to: usize,
    pub timestamp: DateTime<Utc>,
}

/// Pick a random source node and one of its neighbors. Returns `None` for an
/// empty topology or a source without neighbors.
pub fn simulate_transmission<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Option<Transmission> {
    let source = topology.nodes().choose(rng)?;
    let destination = source.neighbors.choose(rng)?;
    Some(Transmission {
        from: source.id,
        to: *destination,
        timestamp: Utc::now(),
    })
}

/// Bounded FIFO of the most recent transmissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionLog {
    capacity: usize,
    entries: VecDeque<Transmission>,
}

impl TransmissionLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, transmission: Transmission) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(transmission);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Transmission> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<Transmission> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for TransmissionLog {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSMISSION_LOG_CAPACITY)
    }
}
