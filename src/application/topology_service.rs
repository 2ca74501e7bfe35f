use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::info;

use super::scheduler::{PeriodicTask, TickControl};
use super::state::SharedState;
use crate::common::{ApplicationResult, DomainError};
use crate::config::TopologyConfig;
use crate::domains::logger::DynLogger;
use crate::domains::topology::{TopologyController, TopologyEvent, TopologySnapshot};
use crate::domains::visualization::{topology_scene, Scene};

/// Smallest node count accepted from the user.
pub const MIN_NODE_COUNT: usize = 2;

/// Drives the random topology generator and its transmission timer.
pub struct TopologyService {
    state: SharedState<TopologyController, TopologyEvent>,
    timer: PeriodicTask,
    interval: Duration,
    logger: DynLogger,
}

impl TopologyService {
    pub fn new(config: &TopologyConfig, logger: DynLogger, events: Option<mpsc::Sender<TopologyEvent>>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: SharedState::new(TopologyController::new(config.log_capacity, rng), events),
            timer: PeriodicTask::new("transmissions"),
            interval: Duration::from_millis(config.transmission_interval_ms),
            logger,
        }
    }

    /// Build a fresh topology. Stops a running transmission timer and clears
    /// the transmission log.
    pub fn generate(&mut self, node_count: usize) -> Arc<TopologySnapshot> {
        let node_count = node_count.max(MIN_NODE_COUNT);
        self.stop_transmissions();
        let event = self.state.update(|c| c.generate(node_count));
        if let TopologyEvent::TopologyGenerated { node_count, edge_count, .. } = &event {
            info!(node_count, edge_count, "topology generated");
            self.logger.info(&format!("Generated topology: {} nodes, {} edges", node_count, edge_count));
        }
        self.state.emit(event);
        self.state.current()
    }

    pub fn start_transmissions(&mut self) -> ApplicationResult<()> {
        if self.state.read(|c| c.topology().is_empty()) {
            return Err(DomainError::InvalidCommand {
                reason: "Generate a topology before simulating transmissions".to_string(),
            }
            .into());
        }
        self.state.update(|c| c.set_simulating(true));
        let state = self.state.clone();
        let started = self.timer.start(self.interval, move || {
            let (event, simulating) = state.update(|c| (c.timer_tick(), c.is_simulating()));
            if let Some(event) = event {
                state.emit(event);
            }
            if simulating {
                TickControl::Continue
            } else {
                TickControl::Stop
            }
        });
        if let Err(e) = started {
            self.state.update(|c| c.set_simulating(false));
            return Err(e);
        }
        self.state.emit(TopologyEvent::TransmissionsStarted { timestamp: Utc::now() });
        Ok(())
    }

    /// Returns whether a timer was running.
    pub fn stop_transmissions(&mut self) -> bool {
        let was_active = self.timer.stop();
        if self.state.read(|c| c.is_simulating()) {
            self.state.update(|c| c.set_simulating(false));
            self.state.emit(TopologyEvent::TransmissionsStopped { timestamp: Utc::now() });
        }
        was_active
    }

    pub fn is_simulating(&self) -> bool {
        self.timer.is_active()
    }

    /// Advance one transmission without the timer.
    pub fn step(&self) -> Option<TopologyEvent> {
        let event = self.state.update(|c| c.tick());
        if let Some(event) = &event {
            self.state.emit(event.clone());
        }
        event
    }

    pub fn snapshot(&self) -> Arc<TopologySnapshot> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<TopologySnapshot>> {
        self.state.subscribe()
    }

    pub fn scene(&self) -> Scene {
        self.state.read(|c| topology_scene(c.topology()))
    }
}
