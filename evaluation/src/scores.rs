use std::fmt;
use std::ops::Neg;

use uci::Score;

/// Base value for checkmate. Mate in n moves scores MATE_VALUE - n.
pub const MATE_VALUE: i32 = 29_000;
/// Longest mate distance kept apart from centipawn scores.
pub const MAX_MATE_MOVES: i32 = 500;
/// Centipawn scores are clamped to stay below every mate score.
pub const CENTIPAWN_LIMIT: i32 = MATE_VALUE - MAX_MATE_MOVES - 1;

/// Position score from the side to move, on a single centipawn-equivalent scale.
///
/// Mate scores sit outside `±CENTIPAWN_LIMIT`, so a forced mate for either
/// side compares consistently with every finite score. Negating flips the
/// perspective to the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Evaluation(i32);

impl Evaluation {
    pub const DRAW: Evaluation = Evaluation(0);

    pub fn centipawns(cp: i32) -> Self {
        Self(cp.clamp(-CENTIPAWN_LIMIT, CENTIPAWN_LIMIT))
    }

    /// Positive `moves` mates the opponent, negative gets mated, zero means
    /// the side to move is already checkmated.
    pub fn mate_in(moves: i32) -> Self {
        match moves {
            0 => Self::mated(),
            m if m > 0 => Self(MATE_VALUE - m.min(MAX_MATE_MOVES)),
            m => Self(-(MATE_VALUE - m.saturating_neg().min(MAX_MATE_MOVES))),
        }
    }

    /// The side to move is checkmated.
    pub fn mated() -> Self {
        Self(-MATE_VALUE)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_mate(self) -> bool {
        self.0.abs() > CENTIPAWN_LIMIT
    }

    /// Moves to mate, negative when the side to move is getting mated.
    pub fn mate_moves(self) -> Option<i32> {
        if self.0 > CENTIPAWN_LIMIT {
            Some(MATE_VALUE - self.0)
        } else if self.0 < -CENTIPAWN_LIMIT {
            Some(-(MATE_VALUE + self.0))
        } else {
            None
        }
    }
}

impl Neg for Evaluation {
    type Output = Evaluation;

    fn neg(self) -> Self::Output {
        Evaluation(-self.0)
    }
}

impl From<Score> for Evaluation {
    fn from(score: Score) -> Self {
        match score {
            Score::Centipawns(cp) => Evaluation::centipawns(cp),
            Score::Mate(moves) => Evaluation::mate_in(moves),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mate_moves() {
            Some(moves) if self.0 > 0 => write!(f, "#+{}", moves),
            Some(moves) => write!(f, "#-{}", moves.abs()),
            None => write!(f, "{:+.2}", self.0 as f32 / 100.0),
        }
    }
}
