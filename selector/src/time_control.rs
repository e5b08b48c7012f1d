use std::time::Duration;

use cozy_chess::{Board, Color};
use uci::GoParams;
use utils::only_move;

const MOVE_MARGIN_START: u32 = 20;
const MOVE_MARGIN_END: u32 = 10;
const INCREMENT_USAGE: f64 = 0.8;
const RESERVE_FRACTION: f64 = 0.08;
const TARGET_FACTOR: f64 = 0.7; // Spend 70% of what the clock could afford

const MIN_RESERVE: Duration = Duration::from_millis(300);
const OVERHEAD: Duration = Duration::from_millis(20);
const MIN_TIME_PER_MOVE: Duration = Duration::from_millis(25);
const ONLY_MOVE_TIME: Duration = Duration::from_millis(100);

/// Used when `go` names neither a clock nor a move time.
pub const DEFAULT_MOVE_TIME: Duration = Duration::from_millis(1000);

/// How much time the bot has for the current decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeControl {
    /// A fixed amount for this move (UCI `movetime`).
    Fixed(Duration),
    /// The side to move's game clock.
    Clock {
        remaining: Duration,
        increment: Duration,
    },
}

impl Default for TimeControl {
    fn default() -> Self {
        TimeControl::Fixed(DEFAULT_MOVE_TIME)
    }
}

impl TimeControl {
    pub fn from_go(params: &GoParams, side: Color) -> Self {
        if let Some(move_time) = params.move_time {
            return TimeControl::Fixed(Duration::from_millis(move_time));
        }

        let (time_left, increment) = match side {
            Color::White => (params.wtime, params.winc),
            Color::Black => (params.btime, params.binc),
        };

        match time_left {
            Some(time_left) => TimeControl::Clock {
                remaining: Duration::from_millis(time_left),
                increment: Duration::from_millis(increment.unwrap_or(0)),
            },
            None => TimeControl::default(),
        }
    }

    /// Search time for one engine decision on `board`.
    pub fn move_allotment(&self, board: &Board) -> Duration {
        let (remaining, increment) = match *self {
            TimeControl::Fixed(time) => return time,
            TimeControl::Clock {
                remaining,
                increment,
            } => (remaining, increment),
        };

        if only_move(board) {
            return ONLY_MOVE_TIME.min(remaining / 2);
        }

        let reserve = remaining.mul_f64(RESERVE_FRACTION).max(MIN_RESERVE);
        let available = remaining.saturating_sub(reserve).saturating_sub(OVERHEAD);

        let hard = (available / move_margin(board) + increment.mul_f64(INCREMENT_USAGE))
            .max(MIN_TIME_PER_MOVE);

        hard.mul_f64(TARGET_FACTOR)
    }

    /// Total time a scan over every candidate may take. Only a running
    /// clock imposes one; a fixed move time leaves the baseline slice alone.
    pub fn evaluation_cap(&self, clock_percent: u32) -> Option<Duration> {
        match *self {
            TimeControl::Fixed(_) => None,
            TimeControl::Clock { remaining, .. } => {
                Some(remaining * clock_percent.min(100) / 100)
            }
        }
    }
}

/// Per-candidate evaluation time: `baseline`, unless `candidates` baseline
/// slices would exceed `cap`, in which case the cap is split evenly.
pub fn candidate_slice(baseline: Duration, cap: Duration, candidates: usize) -> Duration {
    let n = u32::try_from(candidates.max(1)).unwrap_or(u32::MAX);

    match baseline.checked_mul(n) {
        Some(total) if total <= cap => baseline,
        _ => cap / n,
    }
}

fn move_margin(board: &Board) -> u32 {
    const TOTAL_PIECES: f32 = 32.0;

    let num_pieces = board.occupied().len() as f32;
    let phase = (num_pieces / TOTAL_PIECES).min(1.0);

    ((phase * MOVE_MARGIN_START as f32 + (1.0 - phase) * MOVE_MARGIN_END as f32) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_from_go_move_time() {
        let params = GoParams {
            move_time: Some(250),
            wtime: Some(60_000),
            ..Default::default()
        };
        assert_eq!(
            TimeControl::from_go(&params, Color::White),
            TimeControl::Fixed(ms(250))
        );
    }

    #[test]
    fn test_from_go_uses_side_to_move_clock() {
        let params = GoParams {
            wtime: Some(60_000),
            btime: Some(30_000),
            winc: Some(1_000),
            binc: Some(500),
            ..Default::default()
        };
        assert_eq!(
            TimeControl::from_go(&params, Color::Black),
            TimeControl::Clock {
                remaining: ms(30_000),
                increment: ms(500)
            }
        );
    }

    #[test]
    fn test_from_go_without_time() {
        let params = GoParams {
            infinite: true,
            ..Default::default()
        };
        assert_eq!(
            TimeControl::from_go(&params, Color::White),
            TimeControl::Fixed(DEFAULT_MOVE_TIME)
        );
    }

    #[test]
    fn test_fixed_allotment_is_exact() {
        let board = Board::default();
        assert_eq!(TimeControl::Fixed(ms(400)).move_allotment(&board), ms(400));
    }

    #[test]
    fn test_clock_allotment() {
        let board = Board::default();
        let clock = TimeControl::Clock {
            remaining: ms(60_000),
            increment: ms(0),
        };

        let allotment = clock.move_allotment(&board);
        // 60s - 4.8s reserve - 20ms overhead over 20 moves, at 70%.
        assert!(allotment > ms(1_900) && allotment < ms(2_000), "{:?}", allotment);
    }

    #[test]
    fn test_clock_allotment_has_floor() {
        let board = Board::default();
        let clock = TimeControl::Clock {
            remaining: ms(50),
            increment: ms(0),
        };

        assert!(clock.move_allotment(&board) > Duration::ZERO);
    }

    #[test]
    fn test_only_move_allotment() {
        let board: Board = "k7/8/8/8/8/8/8/1R5K b - - 0 1".parse().unwrap();
        let clock = TimeControl::Clock {
            remaining: ms(60_000),
            increment: ms(0),
        };

        assert_eq!(clock.move_allotment(&board), ONLY_MOVE_TIME);
    }

    #[test]
    fn test_evaluation_cap() {
        let clock = TimeControl::Clock {
            remaining: ms(5_000),
            increment: ms(2_000),
        };
        assert_eq!(clock.evaluation_cap(10), Some(ms(500)));
        assert_eq!(TimeControl::Fixed(ms(300)).evaluation_cap(10), None);
    }

    #[test]
    fn test_candidate_slice_keeps_baseline_when_it_fits() {
        assert_eq!(candidate_slice(ms(100), ms(500), 5), ms(100));
    }

    #[test]
    fn test_candidate_slice_splits_cap() {
        let slice = candidate_slice(ms(100), ms(500), 48);
        assert_eq!(slice, ms(500) / 48);
        assert!(slice * 48 <= ms(500));
    }

    #[test]
    fn test_candidate_slice_zero_candidates() {
        assert_eq!(candidate_slice(ms(100), ms(50), 0), ms(50));
    }
}
