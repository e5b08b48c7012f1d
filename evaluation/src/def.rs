use std::time::Duration;

use cozy_chess::{Board, Move};

use crate::{Evaluation, EvaluationError};

/// The engine's pick for a position, with its score when one was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub mv: Move,
    pub evaluation: Option<Evaluation>,
}

/// Position judgments delegated to an external engine.
pub trait Evaluator: Send + Sync {
    fn name(&self) -> String;

    /// Score `board` from the side to move, searching for about `slice`.
    fn evaluate(&self, board: &Board, slice: Duration) -> Result<Evaluation, EvaluationError>;

    /// The engine's own best move, optionally restricted to `search_moves`.
    fn best_move(
        &self,
        board: &Board,
        time: Duration,
        search_moves: Option<&[Move]>,
    ) -> Result<BestMove, EvaluationError>;

    fn new_game(&self) -> Result<(), EvaluationError> {
        Ok(())
    }

    /// Release the engine. Must be idempotent.
    fn close(&self) {}
}
