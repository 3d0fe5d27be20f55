//! Contract error types for training service
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! Problem Details responses.

use thiserror::Error;

/// Training service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainingError {
    /// Missing or malformed input, rejected before touching the store
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Referenced user, video, ... does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Uniqueness conflict (email already registered, ...)
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Missing, invalid or expired credentials
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Authenticated but not allowed
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Store or infrastructure failure
    #[error("Internal error")]
    Internal,
}

impl TrainingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}
