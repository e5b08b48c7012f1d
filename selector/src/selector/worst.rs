use cozy_chess::Move;
use evaluation::Evaluation;
use log::debug;
use rand::seq::SliceRandom;
use utils::{has_check, is_capture, make_move};

use crate::time_control::candidate_slice;
use crate::{SelectionError, StrategyKind, WorstParams};

use super::{Decision, MoveSelector, Request};

/// Preference among equally bad moves: quiet first, captures last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Quiet,
    Check,
    Capture,
}

struct Candidate {
    mv: Move,
    bucket: Bucket,
}

impl MoveSelector {
    /// Scores every move from the mover's side and plays one of the lowest.
    pub(super) fn worst(
        &mut self,
        request: &Request,
        params: &WorstParams,
    ) -> Result<Decision, SelectionError> {
        let n = request.moves.len();
        let slice = match request.time_control.evaluation_cap(params.clock_percent) {
            Some(cap) => candidate_slice(params.baseline, cap, n),
            None => params.baseline,
        };

        if slice.as_millis() == 0 {
            return Err(SelectionError::TimeBudgetExhausted);
        }
        debug!("Worst: {} candidates at {}ms each", n, slice.as_millis());

        let mut lowest: Option<Evaluation> = None;
        let mut tied: Vec<Candidate> = Vec::new();

        for &mv in &request.moves {
            let scratch = make_move(request.board, mv);

            // A capturing check counts as a capture.
            let bucket = if is_capture(request.board, mv) {
                Bucket::Capture
            } else if has_check(&scratch) {
                Bucket::Check
            } else {
                Bucket::Quiet
            };

            // The engine scores for the opponent, who is to move on the scratch board.
            let score = -self.evaluator.evaluate(&scratch, slice)?;

            match lowest {
                Some(current) if score > current => {}
                Some(current) if score == current => tied.push(Candidate { mv, bucket }),
                _ => {
                    lowest = Some(score);
                    tied.clear();
                    tied.push(Candidate { mv, bucket });
                }
            }
        }

        let preferred = tied
            .iter()
            .map(|candidate| candidate.bucket)
            .min()
            .ok_or(SelectionError::NoLegalMoves)?;
        let pool: Vec<Move> = tied
            .iter()
            .filter(|candidate| candidate.bucket == preferred)
            .map(|candidate| candidate.mv)
            .collect();

        debug!(
            "Worst: {} moves tied, {} in {:?} bucket",
            tied.len(),
            pool.len(),
            preferred
        );

        let mv = pool
            .choose(&mut self.rng)
            .copied()
            .ok_or(SelectionError::NoLegalMoves)?;

        Ok(Decision::new(mv, StrategyKind::Worst).with_evaluation(lowest))
    }
}
