//! Error types for the UCI engine bridge

use thiserror::Error;

/// Result type for engine bridge operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine bridge error types
///
/// Only [`EngineError::Launch`] is fatal to a session; every other failure
/// leaves the session usable, at the cost that the local move list and the
/// engine's internal position may have diverged.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine executable could not be found or spawned
    #[error("Launch error: {0}")]
    Launch(String),

    /// A command could not be delivered to the engine
    #[error("Write error: {0}")]
    Write(String),

    /// Expected line pattern never arrived before the stream ended
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Operation attempted on a session that was already closed
    #[error("Engine session is closed")]
    Closed,
}
