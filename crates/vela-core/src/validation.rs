//! # Validation Module
//!
//! Input validation for the order engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                      │
//! │  ├── Basic format checks, immediate feedback                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any network call)                         │
//! │  ├── Non-numeric quantity input never reaches the ledger                │
//! │  ├── Blank cancellation reasons never reach the ledger                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order Ledger (remote)                                         │
//! │  ├── Authoritative re-validation and recomputation                      │
//! │                                                                         │
//! │  Defense in depth: rejected input costs zero network round trips        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_CANCEL_REASON_LEN, MAX_LINE_QUANTITY, MAX_PROMOTION_CODE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cancellation Reason
// =============================================================================

/// Validates a customer cancellation reason.
///
/// ## Rules
/// - Must be non-empty after trimming whitespace
/// - Bounded length
///
/// Returns the trimmed reason so callers persist exactly what was checked.
///
/// ## Example
/// ```rust
/// use vela_core::validation::validate_cancel_reason;
///
/// assert_eq!(validate_cancel_reason("  Changed mind ").unwrap(), "Changed mind");
/// assert!(validate_cancel_reason("   ").is_err());
/// ```
pub fn validate_cancel_reason(reason: &str) -> ValidationResult<&str> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "cancel reason".to_string(),
        });
    }

    if reason.len() > MAX_CANCEL_REASON_LEN {
        return Err(ValidationError::TooLong {
            field: "cancel reason".to_string(),
            max: MAX_CANCEL_REASON_LEN,
        });
    }

    Ok(reason)
}

// =============================================================================
// Quantity
// =============================================================================

/// Parses a raw quantity input field.
///
/// ## Rules
/// - Must parse as a base-10 integer (rejected before any network call)
/// - Must be within [0, MAX_LINE_QUANTITY]; 0 is allowed and means
///   "remove the line"
///
/// ## Example
/// ```rust
/// use vela_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("3").unwrap(), 3);
/// assert_eq!(parse_quantity(" 0 ").unwrap(), 0);
/// assert!(parse_quantity("abc").is_err());
/// assert!(parse_quantity("1e3").is_err());
/// ```
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    let qty: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "not a number".to_string(),
    })?;

    validate_quantity(qty)?;
    Ok(qty)
}

/// Validates an already-numeric quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_LINE_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Promotion Code
// =============================================================================

/// Validates a promotion code's shape before lookup.
///
/// ## Rules
/// - Non-empty after trimming
/// - Bounded length
/// - Alphanumeric, hyphen, underscore only
pub fn validate_promotion_code(code: &str) -> ValidationResult<&str> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "promotion code".to_string(),
        });
    }

    if code.len() > MAX_PROMOTION_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "promotion code".to_string(),
            max: MAX_PROMOTION_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "promotion code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code)
}

// =============================================================================
// Unit Tests
// =============================================================================
