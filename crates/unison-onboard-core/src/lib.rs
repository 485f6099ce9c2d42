//! Unison onboarding core - platform-independent abstractions
//!
//! This crate provides the configuration, error taxonomy, process
//! abstractions, console sink, and readiness poller shared by the
//! platform-specific crates and the onboarding binary.

mod config;
mod error;
mod poller;
mod process;
mod sink;

pub use config::*;
pub use error::*;
pub use poller::*;
pub use process::*;
pub use sink::*;
