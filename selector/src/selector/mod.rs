use std::sync::Arc;

use cozy_chess::{Board, Move};
use evaluation::{Evaluation, Evaluator};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use uci::move_to_uci;
use utils::restrict_moves;

use crate::{Report, SelectionError, SelectorConfig, Strategy, StrategyKind, TimeControl};

mod best;
mod capture;
mod dispatch;
mod random;
mod worst;

/// A chosen move together with the report describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub mv: Move,
    pub report: Report,
}

/// One `select_move` call: the position and the moves we may play.
pub(crate) struct Request<'a> {
    board: &'a Board,
    time_control: TimeControl,
    /// Legal moves, narrowed by the caller's restriction.
    moves: Vec<Move>,
    restricted: bool,
}

/// How a strategy arrived at its move.
pub(crate) struct Decision {
    mv: Move,
    strategy: StrategyKind,
    evaluation: Option<Evaluation>,
    dispatched: bool,
    fell_back: bool,
}

impl Decision {
    fn new(mv: Move, strategy: StrategyKind) -> Self {
        Self {
            mv,
            strategy,
            evaluation: None,
            dispatched: false,
            fell_back: false,
        }
    }

    fn with_evaluation(mut self, evaluation: Option<Evaluation>) -> Self {
        self.evaluation = evaluation;
        self
    }
}

pub struct MoveSelector {
    /// Source of every position judgment
    evaluator: Arc<dyn Evaluator>,

    /// How moves are picked, built from the config
    strategy: Strategy,

    /// Drives Random, Capture, Worst tie-breaks and Dispatch draws
    rng: StdRng,

    /// Outcome of the most recent successful selection
    last_report: Option<Report>,
}

impl MoveSelector {
    pub fn new(evaluator: Arc<dyn Evaluator>, strategy: Strategy) -> Self {
        Self {
            evaluator,
            strategy,
            rng: StdRng::from_entropy(),
            last_report: None,
        }
    }

    /// Fixes the random stream, for reproducible games and tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn configure(&mut self, config: &SelectorConfig) -> Result<(), String> {
        self.strategy = config.build_strategy()?;
        info!("Strategy set to {}", self.strategy.kind());
        Ok(())
    }

    pub fn evaluator(&self) -> &Arc<dyn Evaluator> {
        &self.evaluator
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// Picks a move for the side to move on `board`.
    ///
    /// Only legal moves are considered, further narrowed to `restrict_to`
    /// when given. `board` itself is never modified. Draw offers are noted
    /// in the report but always declined.
    pub fn select_move(
        &mut self,
        board: &Board,
        time_control: TimeControl,
        draw_offered: bool,
        restrict_to: Option<&[Move]>,
    ) -> Result<Selection, SelectionError> {
        if draw_offered {
            info!("Draw offered, playing on");
        }

        let request = Request {
            board,
            time_control,
            moves: restrict_moves(board, restrict_to),
            restricted: restrict_to.is_some(),
        };

        let strategy = self.strategy.clone();
        let decision = self.run(&strategy, &request)?;

        let report = Report {
            strategy: decision.strategy,
            chosen: move_to_uci(board, decision.mv),
            evaluation: decision.evaluation,
            candidates: request.moves.len(),
            dispatched: decision.dispatched,
            fell_back: decision.fell_back,
            draw_offered,
        };
        info!("Selected {}", report);
        self.last_report = Some(report.clone());

        Ok(Selection {
            mv: decision.mv,
            report,
        })
    }

    fn run(&mut self, strategy: &Strategy, request: &Request) -> Result<Decision, SelectionError> {
        if request.moves.is_empty() {
            return Err(SelectionError::NoLegalMoves);
        }

        match strategy {
            Strategy::Best => self.best(request),
            Strategy::Random => self.random(request),
            Strategy::Capture => self.capture(request),
            Strategy::Worst(params) => self.worst(request, params),
            Strategy::Dispatch(weights) => self.dispatch(request, weights),
        }
    }
}
