use thiserror::Error;

use crate::ring::SinkError;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid interval '{0}'")]
    Interval(String),
    #[error("tick {0}: {1}")]
    Tick(usize, String),
    #[error("frame output failed: {0}")]
    Sink(#[from] SinkError),
}
