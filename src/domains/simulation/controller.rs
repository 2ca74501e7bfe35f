use chrono::Utc;
use rand::rngs::StdRng;
use uuid::Uuid;

use super::events::SimulationEvent;
use super::snapshot::{SimulationSnapshot, SimulationState};
use crate::common::{DomainError, DomainResult};
use crate::domains::agent::{Agent, AgentPatch, INITIAL_BATTERY};
use crate::domains::grid::{sanitize_probability, Grid, GridCoord, DEFAULT_OBSTACLE_PROBABILITY};
use crate::domains::messages::{InboundMessage, MessageOutcome};
use crate::domains::path_planning::{parse_paths, DronePath};
use crate::domains::telemetry::{BlockSample, Telemetry};
use crate::domains::visualization::CameraView;

pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GRID_SIZE: usize = 20;
pub const MIN_AGENT_COUNT: usize = 1;
pub const MAX_AGENT_COUNT: usize = 10;
pub const MIN_CONNECTION_RADIUS: f64 = 1.0;
pub const MAX_CONNECTION_RADIUS: f64 = 10.0;
pub const DEFAULT_CONNECTION_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub grid_size: usize,
    pub agent_count: usize,
    pub obstacle_probability: f64,
    pub connection_radius: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            grid_size: 10,
            agent_count: 3,
            obstacle_probability: DEFAULT_OBSTACLE_PROBABILITY,
            connection_radius: DEFAULT_CONNECTION_RADIUS,
        }
    }
}

fn clamp_radius(radius: f64) -> f64 {
    if !radius.is_finite() {
        return DEFAULT_CONNECTION_RADIUS;
    }
    let snapped = (radius * 2.0).round() / 2.0;
    snapped.clamp(MIN_CONNECTION_RADIUS, MAX_CONNECTION_RADIUS)
}

/// Single owner of the path simulation state.
///
/// Two states: `Idle` and `Running`. `tick` only advances while running and
/// drops back to idle once the step cursor reaches the end of the first
/// agent's path.
pub struct SimulationController {
    run_id: Uuid,
    state: SimulationState,
    settings: SimulationSettings,
    grid: Grid,
    agents: Vec<Agent>,
    paths: Vec<DronePath>,
    cursor: usize,
    visited: Vec<GridCoord>,
    telemetry: Telemetry,
    camera_view: CameraView,
    selected_agent: Option<u32>,
    collision_avoidance: bool,
    rng: StdRng,
}

impl SimulationController {
    pub fn new(settings: SimulationSettings, mut rng: StdRng) -> Self {
        let settings = SimulationSettings {
            grid_size: settings.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
            agent_count: settings.agent_count.clamp(MIN_AGENT_COUNT, MAX_AGENT_COUNT),
            obstacle_probability: sanitize_probability(settings.obstacle_probability),
            connection_radius: clamp_radius(settings.connection_radius),
        };
        let grid = Grid::generate(settings.grid_size, settings.obstacle_probability, &mut rng);
        let agents = Agent::roster(settings.agent_count);
        let grid = grid.with_agents(agents.iter().map(|a| a.position));
        Self {
            run_id: Uuid::new_v4(),
            state: SimulationState::Idle,
            settings,
            grid,
            agents,
            paths: Vec::new(),
            cursor: 0,
            visited: Vec::new(),
            telemetry: Telemetry::new(),
            camera_view: CameraView::default(),
            selected_agent: None,
            collision_avoidance: true,
            rng,
        }
    }

    /// Parse and install new drone paths. On failure nothing changes.
    pub fn load_paths(&mut self, input: &str) -> DomainResult<SimulationEvent> {
        let paths = parse_paths(input, self.grid.size())?;
        self.settings.agent_count = paths.len();
        self.paths = paths;
        self.cursor = 0;
        self.run_id = Uuid::new_v4();
        self.replace_agents(Agent::roster(self.settings.agent_count));
        Ok(SimulationEvent::PathsLoaded {
            run_id: self.run_id,
            agent_count: self.settings.agent_count,
            timestamp: Utc::now(),
        })
    }

    /// Enter `Running`. Returns `Ok(None)` when already running.
    pub fn start(&mut self) -> DomainResult<Option<SimulationEvent>> {
        if self.is_running() {
            return Ok(None);
        }
        if self.paths.is_empty() {
            return Err(DomainError::InvalidCommand {
                reason: "No drone paths loaded".to_string(),
            });
        }
        if self.cursor >= self.path_length() {
            return Err(DomainError::InvalidCommand {
                reason: "Drone paths already completed; reset or load new paths".to_string(),
            });
        }
        self.state = SimulationState::Running;
        Ok(Some(SimulationEvent::SimulationStarted {
            run_id: self.run_id,
            timestamp: Utc::now(),
        }))
    }

    /// Return to `Idle`. `None` when nothing was running.
    pub fn pause(&mut self) -> Option<SimulationEvent> {
        if !self.is_running() {
            return None;
        }
        self.state = SimulationState::Idle;
        Some(SimulationEvent::SimulationPaused {
            run_id: self.run_id,
            cursor: self.cursor,
            timestamp: Utc::now(),
        })
    }

    /// Advance every agent one step along its path.
    ///
    /// Coordinates outside the current grid leave that agent where it is for
    /// this step. The cursor moves for all agents regardless.
    pub fn tick(&mut self) -> Vec<SimulationEvent> {
        if !self.is_running() {
            return Vec::new();
        }
        let end = self.path_length();
        if self.cursor >= end {
            return vec![self.complete()];
        }

        let cursor = self.cursor;
        let mut moved_agents = 0;
        let mut next = Vec::with_capacity(self.agents.len());
        for (index, agent) in self.agents.iter().enumerate() {
            match self.paths.get(index).and_then(|path| path.get(cursor)) {
                Some(&coord) if self.grid.contains(coord) => {
                    self.visited.push(coord);
                    next.push(agent.moved_to(coord, &mut self.rng));
                    moved_agents += 1;
                }
                _ => next.push(agent.clone()),
            }
        }
        self.replace_agents(next);

        let ids: Vec<u32> = self.agents.iter().map(|a| a.id).collect();
        self.telemetry.collect(ids, &mut self.rng);
        self.telemetry.record_block(BlockSample::random(&mut self.rng));

        self.cursor += 1;
        let mut events = vec![SimulationEvent::StepAdvanced {
            run_id: self.run_id,
            cursor: self.cursor,
            moved_agents,
            timestamp: Utc::now(),
        }];
        if self.cursor >= end {
            events.push(self.complete());
        }
        events
    }

    fn complete(&mut self) -> SimulationEvent {
        self.state = SimulationState::Idle;
        SimulationEvent::SimulationCompleted {
            run_id: self.run_id,
            steps: self.cursor,
            timestamp: Utc::now(),
        }
    }

    /// Back to a fresh grid, parked agents and no paths.
    pub fn reset(&mut self) -> SimulationEvent {
        self.state = SimulationState::Idle;
        self.grid = Grid::generate(self.settings.grid_size, self.settings.obstacle_probability, &mut self.rng);
        self.replace_agents(Agent::roster(self.settings.agent_count));
        self.telemetry.clear();
        self.visited.clear();
        self.cursor = 0;
        self.paths.clear();
        self.selected_agent = None;
        self.run_id = Uuid::new_v4();
        SimulationEvent::SimulationReset {
            run_id: self.run_id,
            agent_count: self.agents.len(),
            timestamp: Utc::now(),
        }
    }

    /// Regenerate grid and agents at a new size. Loaded paths are kept.
    pub fn set_grid_size(&mut self, size: usize) -> usize {
        self.settings.grid_size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.grid = Grid::generate(self.settings.grid_size, self.settings.obstacle_probability, &mut self.rng);
        self.replace_agents(Agent::roster(self.settings.agent_count));
        self.settings.grid_size
    }

    pub fn set_agent_count(&mut self, count: usize) -> usize {
        self.settings.agent_count = count.clamp(MIN_AGENT_COUNT, MAX_AGENT_COUNT);
        self.replace_agents(Agent::roster(self.settings.agent_count));
        self.settings.agent_count
    }

    pub fn set_connection_radius(&mut self, radius: f64) -> f64 {
        self.settings.connection_radius = clamp_radius(radius);
        self.settings.connection_radius
    }

    pub fn set_camera_view(&mut self, view: CameraView) {
        self.camera_view = view;
    }

    pub fn set_collision_avoidance(&mut self, enabled: bool) {
        self.collision_avoidance = enabled;
    }

    pub fn select_agent(&mut self, id: u32) -> DomainResult<Agent> {
        let agent = self.agent(id).cloned().ok_or(DomainError::AgentNotFound { id })?;
        self.selected_agent = Some(id);
        Ok(agent)
    }

    /// Merge one decoded network message. Anything that fails validation
    /// leaves the state untouched.
    pub fn apply_message(&mut self, message: InboundMessage) -> MessageOutcome {
        let kind = message.kind().to_string();
        match message {
            InboundMessage::AgentUpdate { agent_id, update } => self.apply_agent_patch(agent_id, &update, kind),
            // The adopted grid may fall outside the configured size range; the
            // setting itself is untouched and applies again on reset.
            InboundMessage::GridUpdate { grid } => match Grid::from_rows(grid) {
                Ok(grid) => {
                    self.grid = grid.with_agents(self.agents.iter().map(|a| a.position));
                    MessageOutcome::Applied { kind }
                }
                Err(e) => MessageOutcome::Rejected { reason: e.to_string() },
            },
        }
    }

    fn apply_agent_patch(&mut self, agent_id: u32, patch: &AgentPatch, kind: String) -> MessageOutcome {
        let Some(index) = self.agents.iter().position(|a| a.id == agent_id) else {
            return MessageOutcome::Ignored {
                reason: format!("no agent with id {}", agent_id),
            };
        };
        let patched = self.agents[index].patched(patch);
        if !self.grid.contains(patched.position) {
            return MessageOutcome::Rejected {
                reason: format!("position {} outside {}x{} grid", patched.position, self.grid.size(), self.grid.size()),
            };
        }
        if patched.battery > INITIAL_BATTERY {
            return MessageOutcome::Rejected {
                reason: format!("battery {} above {}", patched.battery, INITIAL_BATTERY),
            };
        }
        if !patched.temperature.is_finite() {
            return MessageOutcome::Rejected {
                reason: "temperature is not a finite number".to_string(),
            };
        }
        let mut next = self.agents.clone();
        next[index] = patched;
        self.replace_agents(next);
        MessageOutcome::Applied { kind }
    }

    fn replace_agents(&mut self, agents: Vec<Agent>) {
        self.grid = self.grid.with_agents(agents.iter().map(|a| a.position));
        self.agents = agents;
    }

    fn path_length(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: u32) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn paths(&self) -> &[DronePath] {
        &self.paths
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn visited_cells(&self) -> &[GridCoord] {
        &self.visited
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            run_id: self.run_id,
            state: self.state,
            grid: self.grid.clone(),
            agents: self.agents.clone(),
            paths: self.paths.clone(),
            cursor: self.cursor,
            visited_cells: self.visited.clone(),
            telemetry: self.telemetry.clone(),
            connection_radius: self.settings.connection_radius,
            camera_view: self.camera_view,
            selected_agent: self.selected_agent,
            collision_avoidance: self.collision_avoidance,
        }
    }
}
