//! # Ledger Error Types
//!
//! Failures crossing the network boundary.
//!
//! ## Surfacing Policy
//! Remote failures carry the service-provided message when one exists and
//! fall back to generic wording otherwise. Service-side rule rejections
//! (promotion rules, lifecycle rules) come back as the same typed errors
//! the client evaluates locally, so the UI renders one message either way.

use thiserror::Error;
use vela_core::{LifecycleError, PromotionError, ValidationError};

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors from a remote collaborator call.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The service failed the operation. No state was changed remotely
    /// beyond what the service itself reports.
    #[error("{}", .message.as_deref().unwrap_or("The service could not complete the request"))]
    Remote { message: Option<String> },

    /// The entity does not exist on the service.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The service rejected the input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service rejected a promotion code.
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// The service rejected a status transition.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Transport-level failure (connection refused, timeout, bad TLS).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a body the client could not interpret.
    #[error("Malformed response from service: {0}")]
    MalformedResponse(String),
}

impl LedgerError {
    /// A remote failure with no service-provided message.
    pub fn remote_generic() -> Self {
        LedgerError::Remote { message: None }
    }

    /// A remote failure carrying the service's message.
    pub fn remote(message: impl Into<String>) -> Self {
        LedgerError::Remote {
            message: Some(message.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_fallback() {
        assert_eq!(
            LedgerError::remote_generic().to_string(),
            "The service could not complete the request"
        );
        assert_eq!(
            LedgerError::remote("Ledger is down for maintenance").to_string(),
            "Ledger is down for maintenance"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: LedgerError = PromotionError::NotFound("SALE10".to_string()).into();
        assert_eq!(err.to_string(), "Promotion code SALE10 not found");
    }
}
