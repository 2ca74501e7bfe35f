pub mod controller;
pub mod events;
pub mod snapshot;

pub use controller::*;
pub use events::*;
pub use snapshot::*;
