use std::fmt;

use evaluation::Evaluation;

use crate::StrategyKind;

/// What the last decision was and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The strategy that picked the move. Capture stays Capture when it deferred to Best.
    pub strategy: StrategyKind,
    /// Chosen move in UCI notation.
    pub chosen: String,
    /// Score of the chosen move from the mover's side, when one was computed.
    pub evaluation: Option<Evaluation>,
    pub candidates: usize,
    /// Set when the strategy came from a weighted draw.
    pub dispatched: bool,
    /// Set when Capture found nothing to take and deferred to Best.
    pub fell_back: bool,
    pub draw_offered: bool,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.strategy, self.chosen)?;
        if let Some(evaluation) = self.evaluation {
            write!(f, " eval {}", evaluation)?;
        }
        write!(f, " from {} moves", self.candidates)?;

        if self.dispatched {
            f.write_str(" (dispatched)")?;
        }
        if self.fell_back {
            f.write_str(" (no captures, played best)")?;
        }
        if self.draw_offered {
            f.write_str(" (draw declined)")?;
        }
        Ok(())
    }
}
