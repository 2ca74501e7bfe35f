pub mod socket_feed;

pub use socket_feed::*;
