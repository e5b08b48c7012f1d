use cozy_chess::Move;
use log::debug;
use rand::seq::SliceRandom;
use utils::is_capture;

use crate::{SelectionError, StrategyKind};

use super::{Decision, MoveSelector, Request};

impl MoveSelector {
    /// Any capture, uniformly. Without one, play what Best would.
    pub(super) fn capture(&mut self, request: &Request) -> Result<Decision, SelectionError> {
        let captures: Vec<Move> = request
            .moves
            .iter()
            .copied()
            .filter(|&mv| is_capture(request.board, mv))
            .collect();

        match captures.choose(&mut self.rng) {
            Some(&mv) => Ok(Decision::new(mv, StrategyKind::Capture)),
            None => {
                debug!("Capture: nothing to take, deferring to Best");
                let mut decision = self.best(request)?;
                decision.strategy = StrategyKind::Capture;
                decision.fell_back = true;
                Ok(decision)
            }
        }
    }
}
