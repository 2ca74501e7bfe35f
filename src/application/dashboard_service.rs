use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::scheduler::{PeriodicTask, TickControl};
use super::state::SharedState;
use crate::adapters::inbound::SocketFeed;
use crate::common::{ApplicationResult, DomainError};
use crate::config::SimulationConfig;
use crate::domains::agent::Agent;
use crate::domains::ledger::{DeployReceipt, LedgerClient};
use crate::domains::logger::DynLogger;
use crate::domains::messages::{InboundMessage, MessageOutcome};
use crate::domains::simulation::{
    SimulationController, SimulationEvent, SimulationSettings, SimulationSnapshot, SimulationState,
};
use crate::domains::telemetry::{block_chart, data_point_chart, ChartRecord};
use crate::domains::visualization::{grid_scene, information_transfer_scene, Camera, CameraView, Scene};

type SharedSimulation = SharedState<SimulationController, SimulationEvent>;

/// Applies raw network frames to the simulation. Cheap to clone; safe to
/// move into a feed task.
#[derive(Clone)]
pub struct MessageSink {
    state: SharedSimulation,
    logger: DynLogger,
}

impl MessageSink {
    pub fn handle(&self, raw: &str) -> MessageOutcome {
        let outcome = match InboundMessage::decode(raw) {
            Ok(message) => self.state.update(|c| c.apply_message(message)),
            Err(e) => MessageOutcome::from(e),
        };
        match &outcome {
            MessageOutcome::Applied { kind } => debug!(kind = kind.as_str(), "message applied"),
            MessageOutcome::Ignored { reason } => self.logger.info(&format!("Ignored message: {}", reason)),
            MessageOutcome::Unknown { kind } => self.logger.warn(&format!("Unknown message type: {}", kind)),
            MessageOutcome::Rejected { reason } => {
                self.logger.error(&format!("Error processing message: {}", reason))
            }
        }
        outcome
    }

    /// Drain `feed` until it closes. Returns how many frames were applied.
    pub async fn consume(self, mut feed: SocketFeed) -> usize {
        let mut applied = 0;
        while let Some(frame) = feed.next_frame().await {
            if self.handle(&frame).is_applied() {
                applied += 1;
            }
        }
        info!(url = feed.url(), applied, "socket feed closed");
        applied
    }
}

/// Front door for the path simulation: settings, path input, the one-second
/// step timer, the network feed and the ledger action.
pub struct DashboardService {
    state: SharedSimulation,
    timer: PeriodicTask,
    tick_interval: Duration,
    ledger: Arc<dyn LedgerClient>,
    logger: DynLogger,
}

impl DashboardService {
    pub fn new(
        config: &SimulationConfig,
        ledger: Arc<dyn LedgerClient>,
        logger: DynLogger,
        events: Option<mpsc::Sender<SimulationEvent>>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let settings = SimulationSettings {
            grid_size: config.grid_size,
            agent_count: config.agent_count,
            obstacle_probability: config.obstacle_probability,
            connection_radius: config.connection_radius,
        };
        Self {
            state: SharedState::new(SimulationController::new(settings, rng), events),
            timer: PeriodicTask::new("simulation"),
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            ledger,
            logger,
        }
    }

    /// Parse path text and install it. A parse error leaves every piece of
    /// state as it was.
    pub fn load_paths(&mut self, input: &str) -> ApplicationResult<Arc<SimulationSnapshot>> {
        match self.state.update(|c| c.load_paths(input)) {
            Ok(event) => {
                if let SimulationEvent::PathsLoaded { agent_count, .. } = &event {
                    info!(agent_count, "drone paths loaded");
                }
                self.state.emit(event);
                Ok(self.state.current())
            }
            Err(e) => {
                self.logger.error(&format!("Error processing path input: {}", e));
                Err(e.into())
            }
        }
    }

    pub fn start(&mut self) -> ApplicationResult<()> {
        if let Some(event) = self.state.update(|c| c.start())? {
            self.state.emit(event);
        }
        if self.timer.is_active() {
            return Ok(());
        }
        let state = self.state.clone();
        let started = self.timer.start(self.tick_interval, move || {
            let (events, running) = state.update(|c| (c.tick(), c.is_running()));
            state.emit_all(events);
            if running {
                TickControl::Continue
            } else {
                TickControl::Stop
            }
        });
        if let Err(e) = started {
            self.state.update(|c| c.pause());
            return Err(e);
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        self.timer.stop();
        if let Some(event) = self.state.update(|c| c.pause()) {
            self.state.emit(event);
        }
    }

    pub fn toggle(&mut self) -> ApplicationResult<SimulationState> {
        if self.state.read(|c| c.is_running()) {
            self.pause();
        } else {
            self.start()?;
        }
        Ok(self.state.read(|c| c.state()))
    }

    /// One step without the timer. Only advances while running.
    pub fn step(&self) -> Vec<SimulationEvent> {
        let events = self.state.update(|c| c.tick());
        self.state.emit_all(events.clone());
        events
    }

    pub fn reset(&mut self) -> Arc<SimulationSnapshot> {
        self.timer.stop();
        let event = self.state.update(|c| c.reset());
        self.state.emit(event);
        self.state.current()
    }

    pub fn set_grid_size(&mut self, size: usize) -> usize {
        self.state.update(|c| c.set_grid_size(size))
    }

    pub fn set_agent_count(&mut self, count: usize) -> usize {
        self.state.update(|c| c.set_agent_count(count))
    }

    pub fn set_connection_radius(&mut self, radius: f64) -> f64 {
        self.state.update(|c| c.set_connection_radius(radius))
    }

    pub fn set_camera_view(&mut self, view: CameraView) {
        self.state.update(|c| c.set_camera_view(view));
    }

    pub fn set_collision_avoidance(&mut self, enabled: bool) {
        self.state.update(|c| c.set_collision_avoidance(enabled));
    }

    pub fn select_agent(&mut self, id: u32) -> ApplicationResult<Agent> {
        Ok(self.state.update(|c| c.select_agent(id))?)
    }

    pub fn message_sink(&self) -> MessageSink {
        MessageSink {
            state: self.state.clone(),
            logger: self.logger.clone(),
        }
    }

    pub fn handle_message(&self, raw: &str) -> MessageOutcome {
        self.message_sink().handle(raw)
    }

    pub fn spawn_feed(&self, feed: SocketFeed) -> JoinHandle<usize> {
        tokio::spawn(self.message_sink().consume(feed))
    }

    /// Ask the ledger to register an agent. Logged either way, never retried.
    pub async fn deploy_agent(&self, agent_id: u32) -> ApplicationResult<DeployReceipt> {
        if self.state.read(|c| c.agent(agent_id).is_none()) {
            return Err(DomainError::AgentNotFound { id: agent_id }.into());
        }
        match self.ledger.deploy_agent(agent_id).await {
            Ok(receipt) => {
                self.logger.info(&format!(
                    "Agent {} deployed successfully (tx {})",
                    agent_id, receipt.transaction_id
                ));
                Ok(receipt)
            }
            Err(e) => {
                warn!(agent_id, contract = self.ledger.contract_address(), "agent deployment failed");
                self.logger.error(&format!("Error deploying agent {}: {}", agent_id, e));
                Err(DomainError::ExternalService(e.to_string()).into())
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.read(|c| c.is_running())
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn snapshot(&self) -> Arc<SimulationSnapshot> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<SimulationSnapshot>> {
        self.state.subscribe()
    }

    pub fn scene(&self) -> Scene {
        grid_scene(&self.state.current())
    }

    pub fn information_transfer_scene(&self) -> Scene {
        let snapshot = self.state.current();
        information_transfer_scene(
            &snapshot.agents,
            Camera::for_view(snapshot.camera_view),
            &mut rand::thread_rng(),
        )
    }

    pub fn block_chart(&self) -> Vec<ChartRecord> {
        block_chart(&self.state.current().telemetry)
    }

    pub fn data_point_chart(&self) -> Vec<ChartRecord> {
        data_point_chart(&self.state.current().telemetry)
    }
}
