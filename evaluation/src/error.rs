use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("failed to start engine {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("engine exited or closed its output")]
    Disconnected,
    #[error("engine did not answer before the deadline")]
    Timeout,
    #[error("malformed engine output: {0}")]
    Malformed(String),
    #[error("engine session is closed")]
    Closed,
    #[error("evaluation time rounds down to zero milliseconds")]
    ZeroSlice,
}

impl EvaluationError {
    /// Errors that mean the engine process itself is gone.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, EvaluationError::Io(_) | EvaluationError::Disconnected)
    }
}
