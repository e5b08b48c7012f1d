mod config;
mod error;
mod report;
mod selector;
mod strategy;
mod time_control;

pub use config::{ConfigParam, SelectorConfig};
pub use error::SelectionError;
pub use report::Report;
pub use selector::{MoveSelector, Selection};
pub use strategy::{Strategy, StrategyKind, StrategyWeights, WorstParams, STRATEGY_NAMES};
pub use time_control::{candidate_slice, TimeControl, DEFAULT_MOVE_TIME};
