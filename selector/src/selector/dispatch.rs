use log::info;

use crate::{SelectionError, StrategyWeights};

use super::{Decision, MoveSelector, Request};

impl MoveSelector {
    /// Draws a strategy from `weights` and runs it for this call only.
    pub(super) fn dispatch(
        &mut self,
        request: &Request,
        weights: &StrategyWeights,
    ) -> Result<Decision, SelectionError> {
        let strategy = weights.sample(&mut self.rng).clone();
        info!("Dispatching to {}", strategy.kind());

        let mut decision = self.run(&strategy, request)?;
        decision.dispatched = true;
        Ok(decision)
    }
}
