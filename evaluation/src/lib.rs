mod client;
pub mod def;
mod error;
pub mod scores;

pub use client::{EngineClient, EngineSettings};
pub use def::{BestMove, Evaluator};
pub use error::EvaluationError;
pub use scores::Evaluation;
