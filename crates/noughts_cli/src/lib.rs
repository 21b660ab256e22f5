//! Terminal driver for the noughts_crosses engine.
//!
//! Plays the input, display and scheduler roles around the engine: parses
//! typed cells, prints events, and ticks the turn clock on a tokio interval.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod driver;

pub use cli::{Cli, Command, SessionArgs};
pub use config::{AppConfig, EventFormat};
pub use driver::{
    Input, Notice, Printer, Step, apply_input, describe_rejection, run_session,
};
