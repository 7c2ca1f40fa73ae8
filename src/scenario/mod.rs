//! Recorded sensor and receiver data replayed through the renderer.

mod error;
mod parser;
mod replay;

pub use error::ScenarioError;
pub use parser::{Scenario, Tick};
pub use replay::{Replay, ReplaySummary};
