pub mod chart;
pub mod data;

pub use chart::*;
pub use data::*;
