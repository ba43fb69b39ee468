use thiserror::Error;

/// Error type that captures aggregation-layer failures.
///
/// Missing configuration is deliberately absent: settings fall back to
/// documented defaults instead of failing, since these are non-critical
/// display computations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The record-fetch collaborator failed (network/auth). Never collapsed
    /// into an empty result set; callers render a loading/error state.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
    /// Non-finite amounts, negative odometers, and similar programmer errors.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
