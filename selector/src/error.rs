use evaluation::EvaluationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no legal moves to choose from")]
    NoLegalMoves,

    #[error("evaluation unavailable: {0}")]
    EvaluationUnavailable(#[source] EvaluationError),

    #[error("time budget too small to evaluate every candidate")]
    TimeBudgetExhausted,
}

impl From<EvaluationError> for SelectionError {
    fn from(error: EvaluationError) -> Self {
        match error {
            EvaluationError::ZeroSlice => SelectionError::TimeBudgetExhausted,
            other => SelectionError::EvaluationUnavailable(other),
        }
    }
}
