//! # Error Types
//!
//! Domain-specific error types for vela-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vela-core errors (this file)                                           │
//! │  ├── ValidationError  - Input rejected before any network call          │
//! │  ├── PromotionError   - Promotion code rejected by the rule set         │
//! │  ├── LifecycleError   - Illegal order status transition                 │
//! │  └── CoreError        - Umbrella over the above                         │
//! │                                                                         │
//! │  vela-ledger errors (separate crate)                                    │
//! │  └── LedgerError      - Remote operation failures                       │
//! │                                                                         │
//! │  vela-register errors (separate crate)                                  │
//! │  └── RegisterError    - What the UI adapter sees                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → RegisterError → UI   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, status, field)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before any network call is issued: rejected input never
/// reaches the ledger and never changes local state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-numeric quantity input).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Promotion Error
// =============================================================================

/// Why a promotion code was rejected.
///
/// Every variant corresponds to one rule of the promotion rule set; the
/// ledger and the client evaluate the same rules through the same code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromotionError {
    /// No promotion exists for the given code.
    #[error("Promotion code {0} not found")]
    NotFound(String),

    /// Activity flag is off.
    #[error("Promotion {0} is not active")]
    Inactive(String),

    /// Current time is outside the validity window.
    #[error("Promotion {0} is outside its validity window")]
    OutsideWindow(String),

    /// Usage count has reached the usage cap.
    #[error("Promotion {0} has been fully redeemed")]
    UsageExhausted(String),

    /// Order subtotal is below the minimum order value.
    #[error("Order subtotal {subtotal} is below the {minimum} required for this promotion")]
    BelowMinimum { subtotal: i64, minimum: i64 },

    /// An order may carry at most one promotion; the attached one must be
    /// removed explicitly first.
    #[error("A promotion is already applied to this order")]
    AlreadyApplied,
}

// =============================================================================
// Lifecycle Error
// =============================================================================

/// An attempted order status transition that is not in the allowed table.
///
/// The attempt is rejected and the status is left unchanged - transitions
/// are never partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Order cannot go from {from:?} on event {event}")]
    IllegalTransition { from: OrderStatus, event: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for core business logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Promotion(#[from] PromotionError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
