//! The module contains the errors the engine can return.
//!
//! Domain rejections (the pledge processor counts them against the project)
//! are every variant except [`Storage`], which signals that a collection could
//! not be read or written and aborts the operation.
//!
//!  [`Storage`]: EngineError::Storage
use thiserror::Error;

use crate::store::StoreError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("\"{0}\" already present!")]
    Duplicate(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Funding closed for project \"{0}\"")]
    DeadlineExpired(String),
    #[error("Amount below the minimum of reward tier: {0}")]
    BelowMinimum(String),
    #[error("Reward tier \"{0}\" is sold out")]
    QuotaExhausted(String),
    #[error("At least 3 stretch goals are required, got {0}")]
    InsufficientGoalCount(usize),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl EngineError {
    /// Returns `true` for business rule failures, `false` for storage faults.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Duplicate(a), Self::Duplicate(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::DeadlineExpired(a), Self::DeadlineExpired(b)) => a == b,
            (Self::BelowMinimum(a), Self::BelowMinimum(b)) => a == b,
            (Self::QuotaExhausted(a), Self::QuotaExhausted(b)) => a == b,
            (Self::InsufficientGoalCount(a), Self::InsufficientGoalCount(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
