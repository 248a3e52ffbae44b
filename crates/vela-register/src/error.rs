//! # Register Error Types
//!
//! What the UI adapter sees when an engine operation fails.
//!
//! ## Surfacing Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Local rejections (Validation, PromotionAttached, OperationInFlight)    │
//! │  happen before any network call - nothing changed anywhere.             │
//! │                                                                         │
//! │  Ledger rejections arrive AFTER the optimistic UI update; the engine    │
//! │  rolls the affected lines back before surfacing the error, so the UI    │
//! │  only ever renders consistent state next to the message.                │
//! │                                                                         │
//! │  Shipping errors carry the step that failed, because "unknown ward"     │
//! │  and "carrier quote timed out" need different wording.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use vela_core::{LifecycleError, PromotionError, ValidationError};
use vela_ledger::LedgerError;

/// Convenience type alias for Results with RegisterError.
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Which link of the shipping recalculation chain failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingStep {
    /// Province + district did not resolve to a carrier region.
    ResolveRegion,
    /// Ward did not resolve to a delivery zone.
    ResolveZone,
    /// The carrier could not quote a fee.
    Quote,
    /// The ledger rejected the address + fee update.
    Persist,
}

impl ShippingStep {
    pub fn describe(&self) -> &'static str {
        match self {
            ShippingStep::ResolveRegion => "resolving the delivery region",
            ShippingStep::ResolveZone => "resolving the delivery zone",
            ShippingStep::Quote => "quoting the carrier fee",
            ShippingStep::Persist => "saving the new address",
        }
    }
}

/// Errors surfaced by the register engine.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Input rejected locally; no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submission for this tab or order is already in flight. The caller
    /// should wait rather than retry.
    #[error("Another operation is still in progress")]
    OperationInFlight,

    /// The requested tab does not exist (already closed or never opened).
    #[error("Register tab not found: {0}")]
    TabNotFound(u64),

    /// The tab has no order bound yet, but the operation needs one.
    #[error("No order is bound to this tab yet")]
    NoOrderBound,

    /// A promotion is attached; it must be removed before this operation.
    #[error("Remove the applied promotion first")]
    PromotionAttached,

    /// The order's current status does not allow the operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// A promotion rule rejected the code.
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// The shipping chain broke at a specific step. The stored address and
    /// fee are unchanged.
    #[error("Shipping update failed while {}: {source}", step.describe())]
    Shipping {
        step: ShippingStep,
        #[source]
        source: LedgerError,
    },

    /// The ledger failed the operation.
    #[error(transparent)]
    Ledger(LedgerError),
}

impl From<LedgerError> for RegisterError {
    /// Unwraps rule rejections the ledger mirrors from vela-core, so the
    /// UI renders one message whether the rule fired locally or remotely.
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(e) => RegisterError::Validation(e),
            LedgerError::Promotion(e) => RegisterError::Promotion(e),
            LedgerError::Lifecycle(e) => RegisterError::Lifecycle(e),
            other => RegisterError::Ledger(other),
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
    fn test_ledger_rule_rejections_unwrap() {
        let err: RegisterError =
            LedgerError::Promotion(PromotionError::AlreadyApplied).into();
        assert!(matches!(err, RegisterError::Promotion(_)));

        let err: RegisterError = LedgerError::remote("down").into();
        assert!(matches!(err, RegisterError::Ledger(_)));
    }

    #[test]
    fn test_shipping_error_names_the_step() {
        let err = RegisterError::Shipping {
            step: ShippingStep::ResolveZone,
            source: LedgerError::NotFound {
                entity: "zone",
                id: "R-01/Truc Bach".to_string(),
            },
        };
        assert!(err.to_string().contains("resolving the delivery zone"));
    }
}
