pub mod agent;
pub mod geometry;
pub mod grid;
pub mod ledger;
pub mod logger;
pub mod messages;
pub mod path_planning;
pub mod simulation;
pub mod telemetry;
pub mod topology;
pub mod visualization;

pub use agent::{Agent, AgentPatch};
pub use geometry::Position3D;
pub use grid::{Cell, Grid, GridCoord};
pub use ledger::{DeployReceipt, LedgerClient, LedgerError};
pub use logger::{DomainLogger, DynLogger};
pub use messages::{InboundMessage, MessageOutcome};
pub use path_planning::{parse_paths, DronePath};
pub use simulation::{SimulationController, SimulationEvent, SimulationSettings, SimulationSnapshot, SimulationState};
pub use topology::{Topology, TopologyController, TopologyEvent, TopologySnapshot, Transmission};
pub use visualization::{Camera, CameraView, Scene};
