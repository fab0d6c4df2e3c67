//! Visage Test Harness - Playback simulation and invariant checks
//!
//! This crate provides:
//! - A virtual-clock simulator for single utterances
//! - A session simulator replaying speak/stop schedules
//! - Invariant checks over simulated or recorded frames
//! - Player-versus-simulation integration tests

pub mod simulator;
pub mod session;
pub mod integration;

pub use simulator::*;
pub use session::*;
pub use integration::*;
