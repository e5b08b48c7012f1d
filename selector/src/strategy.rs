use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;

/// Names accepted by the `Strategy` option, in the order they are advertised.
pub const STRATEGY_NAMES: &[&str] = &["Dispatch", "Best", "Random", "Capture", "Worst"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Best,
    Random,
    Capture,
    Worst,
    Dispatch,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Best => "Best",
            StrategyKind::Random => "Random",
            StrategyKind::Capture => "Capture",
            StrategyKind::Worst => "Worst",
            StrategyKind::Dispatch => "Dispatch",
        };
        f.write_str(name)
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "best" => Ok(StrategyKind::Best),
            "random" => Ok(StrategyKind::Random),
            "capture" => Ok(StrategyKind::Capture),
            "worst" => Ok(StrategyKind::Worst),
            "dispatch" => Ok(StrategyKind::Dispatch),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// Time rules for the worst-move scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorstParams {
    /// Evaluation time per candidate when the clock allows it.
    pub baseline: Duration,
    /// Share of the remaining clock (percent) the whole scan may use.
    pub clock_percent: u32,
}

impl Default for WorstParams {
    fn default() -> Self {
        Self {
            baseline: Duration::from_millis(100),
            clock_percent: 10,
        }
    }
}

/// A move selection algorithm together with its parameters.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Play the engine's own choice.
    Best,
    /// Uniform over the legal moves.
    Random,
    /// Uniform over captures, otherwise `Best`.
    Capture,
    /// The move leaving the opponent best off, preferring quiet moves on ties.
    Worst(WorstParams),
    /// Pick one of the weighted strategies afresh on every call.
    Dispatch(StrategyWeights),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Best => StrategyKind::Best,
            Strategy::Random => StrategyKind::Random,
            Strategy::Capture => StrategyKind::Capture,
            Strategy::Worst(_) => StrategyKind::Worst,
            Strategy::Dispatch(_) => StrategyKind::Dispatch,
        }
    }
}

/// Fixed categorical distribution over strategies.
#[derive(Debug, Clone)]
pub struct StrategyWeights {
    entries: Vec<(Strategy, u32)>,
    index: WeightedIndex<u32>,
}

impl StrategyWeights {
    /// Fails when there are no entries or every weight is zero.
    pub fn new(entries: Vec<(Strategy, u32)>) -> Result<Self, WeightedError> {
        let index = WeightedIndex::new(entries.iter().map(|(_, weight)| *weight))?;
        Ok(Self { entries, index })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &Strategy {
        &self.entries[self.index.sample(rng)].0
    }

    /// Probability of drawing a strategy of `kind`.
    pub fn probability(&self, kind: StrategyKind) -> f64 {
        let total: u32 = self.entries.iter().map(|(_, w)| w).sum();
        let matching: u32 = self
            .entries
            .iter()
            .filter(|(strategy, _)| strategy.kind() == kind)
            .map(|(_, w)| w)
            .sum();

        matching as f64 / total as f64
    }
}
