//! Visage Speech - Text to pose sequencing
//!
//! This is NOT a text-to-speech phoneme aligner.
//! This is a deterministic, lexicon-assisted approximation of mouth shapes.
//!
//! # Pipeline
//!
//! Text → words → lexicon lookup or per-character fallback → pause tokens
//!
//! Key concepts:
//! - Sequencing is pure and total: every string yields a token list
//! - Emotion detection reads the raw text once per utterance
//! - Timing is a fixed per-token delay table, nothing implicit

pub mod lexicon;
pub mod sequencer;
pub mod emotion;
pub mod mood;
pub mod timing;

pub use lexicon::*;
pub use sequencer::*;
pub use emotion::*;
pub use mood::*;
pub use timing::*;
