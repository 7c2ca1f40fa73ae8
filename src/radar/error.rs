use thiserror::Error;

/// Conditions that stop part or all of a tick from rendering.
///
/// None of them are fatal: the worst case is a tick with fewer lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RadarError {
    #[error("no position fix")]
    NoFix,
    #[error("altitude reference not yet established")]
    NotCalibrated,
    #[error("no sensor reading this tick")]
    NoReading,
    #[error("traffic table changed during refresh")]
    ConcurrentMutation,
}
