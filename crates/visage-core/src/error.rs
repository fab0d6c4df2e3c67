//! Error types for Visage

use thiserror::Error;

/// Core Visage errors
#[derive(Error, Debug)]
pub enum VisageError {
    // Parse errors
    #[error("Unknown expression: {0}")]
    UnknownExpression(String),

    #[error("Empty token")]
    EmptyToken,

    // Sink errors
    #[error("Pose sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Pose sink rejected pose: {0}")]
    SinkRejected(String),

    // Runtime errors
    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    #[error("Logging already initialized: {0}")]
    LoggingInit(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),
}

/// Result type for Visage operations
pub type VisageResult<T> = Result<T, VisageError>;
