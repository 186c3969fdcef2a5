//! Structured error types for the Irminsul workspace.

use thiserror::Error;

/// Unified error type for all Irminsul operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IrminsulError {
    /// Malformed model parameters or alphabet (wrong shape, non-stochastic
    /// rows, duplicate labels). Raised at construction time only.
    #[error("validation error: {0}")]
    Validation(String),

    /// Empty observation sequence, out-of-range observation index, or an
    /// observation code outside the alphabet. Raised before decoding starts.
    #[error("invalid observation: {0}")]
    InvalidObservation(String),
}

impl IrminsulError {
    /// Whether this error was caused by malformed model parameters.
    pub fn is_validation(&self) -> bool {
        matches!(self, IrminsulError::Validation(_))
    }

    /// Whether this error was caused by a bad observation sequence.
    pub fn is_invalid_observation(&self) -> bool {
        matches!(self, IrminsulError::InvalidObservation(_))
    }
}

/// Convenience alias used throughout the Irminsul workspace.
pub type Result<T> = std::result::Result<T, IrminsulError>;
