//! In-process evaluators that record what the selector asks of them.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cozy_chess::{util::parse_uci_move, Board, Move};
use evaluation::{BestMove, Evaluation, EvaluationError, Evaluator};
use selector::{MoveSelector, Strategy};

pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
/// White to move and already checkmated.
pub const MATED: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
/// 48 legal moves for white.
pub const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
/// Rook moves that are quiet, give check (Re1), or capture with check (Rxa8).
pub const ROOK_CHECKS: &str = "r3k3/8/8/8/8/8/8/R6K w - - 0 1";

pub fn board(fen: &str) -> Board {
    fen.parse().unwrap()
}

pub fn mv(board: &Board, uci: &str) -> Move {
    parse_uci_move(board, uci).unwrap()
}

#[derive(Debug, Clone)]
pub struct EvaluateCall {
    pub board: Board,
    pub slice: Duration,
}

#[derive(Debug, Clone)]
pub struct BestMoveCall {
    pub board: Board,
    pub time: Duration,
    pub search_moves: Option<Vec<Move>>,
}

type ScoreFn = Box<dyn Fn(&Board) -> Evaluation + Send + Sync>;

/// Scores positions with a closure and answers best_move with the first
/// allowed move.
pub struct StubEvaluator {
    score: ScoreFn,
    best: Option<String>,
    pub evaluations: Mutex<Vec<EvaluateCall>>,
    pub searches: Mutex<Vec<BestMoveCall>>,
}

impl StubEvaluator {
    pub fn scoring<F>(score: F) -> Arc<Self>
    where
        F: Fn(&Board) -> Evaluation + Send + Sync + 'static,
    {
        Arc::new(Self {
            score: Box::new(score),
            best: None,
            evaluations: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
        })
    }

    pub fn flat() -> Arc<Self> {
        Self::scoring(|_| Evaluation::DRAW)
    }

    /// Always answers best_move with `uci`, allowed or not.
    pub fn insisting(uci: &str) -> Arc<Self> {
        Arc::new(Self {
            score: Box::new(|_| Evaluation::DRAW),
            best: Some(uci.to_string()),
            evaluations: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
        })
    }

    pub fn evaluations(&self) -> Vec<EvaluateCall> {
        self.evaluations.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<BestMoveCall> {
        self.searches.lock().unwrap().clone()
    }
}

impl Evaluator for StubEvaluator {
    fn name(&self) -> String {
        "stub".to_string()
    }

    fn evaluate(&self, board: &Board, slice: Duration) -> Result<Evaluation, EvaluationError> {
        self.evaluations.lock().unwrap().push(EvaluateCall {
            board: board.clone(),
            slice,
        });
        Ok((self.score)(board))
    }

    fn best_move(
        &self,
        board: &Board,
        time: Duration,
        search_moves: Option<&[Move]>,
    ) -> Result<BestMove, EvaluationError> {
        self.searches.lock().unwrap().push(BestMoveCall {
            board: board.clone(),
            time,
            search_moves: search_moves.map(|moves| moves.to_vec()),
        });

        let mv = match &self.best {
            Some(uci) => mv(board, uci),
            None => match search_moves {
                Some(moves) => moves[0],
                None => utils::collect_legal_moves(board)[0],
            },
        };

        Ok(BestMove {
            mv,
            evaluation: Some(Evaluation::centipawns(42)),
        })
    }
}

/// Fails every request the way a dead engine would.
pub struct DeadEvaluator;

impl Evaluator for DeadEvaluator {
    fn name(&self) -> String {
        "dead".to_string()
    }

    fn evaluate(&self, _: &Board, _: Duration) -> Result<Evaluation, EvaluationError> {
        Err(EvaluationError::Disconnected)
    }

    fn best_move(
        &self,
        _: &Board,
        _: Duration,
        _: Option<&[Move]>,
    ) -> Result<BestMove, EvaluationError> {
        Err(EvaluationError::Disconnected)
    }
}

pub fn seeded(evaluator: Arc<dyn Evaluator>, strategy: Strategy, seed: u64) -> MoveSelector {
    MoveSelector::new(evaluator, strategy).with_seed(seed)
}
