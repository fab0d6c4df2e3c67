//! Visage Core - Fundamental types and primitives
//!
//! This crate defines the types shared by the talking-head engine:
//! - Expressions (the six-way emotional affect)
//! - Pose geometry (mouth, tongue and teeth configuration)
//! - Static pose tables for phonemes, expressions and rest
//! - Tokens (phoneme keys and pause markers)
//! - Error types

pub mod expression;
pub mod pose;
pub mod token;
pub mod error;

pub use expression::*;
pub use pose::*;
pub use token::*;
pub use error::*;
