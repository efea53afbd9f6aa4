//! Messenger-agnostic boundary between the tally service and a transport.

pub mod port;
pub mod throttled;
pub mod types;
