//! Visage Runtime - Utterance playback
//!
//! This crate drives a pose sink from text:
//! 1. Resolve the effective expression (requested or detected)
//! 2. Apply the expression's resting pose as a baseline
//! 3. Sequence the text into tokens
//! 4. Step through the tokens on a timer, one pose per step
//! 5. Rest on the expression pose when the tokens run out
//!
//! A newer utterance supersedes the current one: every `speak()` bumps a
//! generation counter, and a step whose generation is stale does nothing.

pub mod config;
pub mod sink;
pub mod utterance;
pub mod player;
pub mod feed;
pub mod driver;
pub mod logging;

pub use config::*;
pub use sink::*;
pub use utterance::*;
pub use player::*;
pub use feed::*;
pub use driver::*;
pub use logging::*;
