use rand::seq::SliceRandom;

use crate::{SelectionError, StrategyKind};

use super::{Decision, MoveSelector, Request};

impl MoveSelector {
    pub(super) fn random(&mut self, request: &Request) -> Result<Decision, SelectionError> {
        let mv = request
            .moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(SelectionError::NoLegalMoves)?;

        Ok(Decision::new(mv, StrategyKind::Random))
    }
}
