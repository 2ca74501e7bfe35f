pub mod dashboard_service;
pub mod scheduler;
pub mod state;
pub mod topology_service;

pub use dashboard_service::*;
pub use scheduler::*;
pub use state::*;
pub use topology_service::*;
