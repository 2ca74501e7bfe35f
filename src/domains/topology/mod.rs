pub mod aggregate;
pub mod controller;
pub mod events;
pub mod transmissions;

pub use aggregate::*;
pub use controller::*;
pub use events::*;
pub use transmissions::*;
