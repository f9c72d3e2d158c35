use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the record store, persistence and text parsing layers.
///
/// The derivation engine itself never produces one of these: malformed input
/// there is reported through [`crate::derivation::Derived::Unchanged`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode snapshot: {0}")]
    Encode(#[from] bincode::Error),

    #[error("failed to encode or decode json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prescription {0} not found")]
    NotFound(Uuid),

    #[error("invalid power value: {0:?}")]
    InvalidPower(String),

    #[error("invalid addition category: {0:?}")]
    InvalidAddition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
