//! Core of the hours tally bot.
//!
//! `tally` is the pure message-to-reply pipeline. The rest is the thin shell the
//! transport adapters plug into: config, logging, authorization and the
//! messaging port.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod security;
pub mod service;
pub mod tally;

#[cfg(test)]
mod testing;

pub use errors::{Error, Result};
