use evaluation::EvaluationError;
use log::debug;
use uci::move_to_uci;

use crate::{SelectionError, StrategyKind};

use super::{Decision, MoveSelector, Request};

impl MoveSelector {
    /// The engine's own choice, searched for the move's share of the clock.
    pub(super) fn best(&mut self, request: &Request) -> Result<Decision, SelectionError> {
        let time = request.time_control.move_allotment(request.board);
        debug!("Best: asking {} for {}ms", self.evaluator.name(), time.as_millis());

        let search_moves = request.restricted.then_some(request.moves.as_slice());
        let best = self
            .evaluator
            .best_move(request.board, time, search_moves)?;

        if !request.moves.contains(&best.mv) {
            return Err(SelectionError::EvaluationUnavailable(
                EvaluationError::Malformed(format!(
                    "engine chose {} outside the allowed moves",
                    move_to_uci(request.board, best.mv)
                )),
            ));
        }

        Ok(Decision::new(best.mv, StrategyKind::Best).with_evaluation(best.evaluation))
    }
}
