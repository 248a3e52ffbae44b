//! # Promotion Module
//!
//! Evaluates order-level promotion codes against a subtotal.
//!
//! ## Rule Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Promotion Evaluation                                  │
//! │                                                                         │
//! │  code ──► active flag on? ──► now within [starts, ends]? ──►            │
//! │           usage count < cap? ──► subtotal >= minimum? ──► OK            │
//! │                                                                         │
//! │  Any "no" rejects the code with a typed PromotionError and changes      │
//! │  nothing. On success:                                                   │
//! │                                                                         │
//! │    discount = min(kind formula over SUBTOTAL, max cap, subtotal)        │
//! │                                                                         │
//! │  The cap applies even to the percentage kind. The discount stacks       │
//! │  with per-variant discounts: those shrink each line's contribution      │
//! │  to the subtotal BEFORE the promotion is applied to that subtotal.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! At most one promotion may be attached to an order; the attach/detach
//! protocol lives in the register engine, this module is only the math and
//! the rule set.

use chrono::{DateTime, Utc};

use crate::error::PromotionError;
use crate::money::Money;
use crate::types::Promotion;

/// Checks eligibility and computes the discount a promotion grants on a
/// subtotal at `now`.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use vela_core::money::Money;
/// use vela_core::promotion::evaluate;
/// use vela_core::types::{DiscountKind, Promotion};
///
/// let now = Utc::now();
/// let sale10 = Promotion {
///     id: "p1".into(),
///     code: "SALE10".into(),
///     kind: DiscountKind::Percentage,
///     value: 10,
///     min_order_minor: 0,
///     max_discount_minor: None,
///     usage_cap: 100,
///     usage_count: 0,
///     starts_at: now - Duration::days(1),
///     ends_at: now + Duration::days(1),
///     is_active: true,
/// };
/// let discount = evaluate(&sale10, Money::from_minor(500_000), now).unwrap();
/// assert_eq!(discount.minor(), 50_000);
/// ```
pub fn evaluate(
    promotion: &Promotion,
    subtotal: Money,
    now: DateTime<Utc>,
) -> Result<Money, PromotionError> {
    if !promotion.is_active {
        return Err(PromotionError::Inactive(promotion.code.clone()));
    }

    if now < promotion.starts_at || now > promotion.ends_at {
        return Err(PromotionError::OutsideWindow(promotion.code.clone()));
    }

    if promotion.usage_count >= promotion.usage_cap {
        return Err(PromotionError::UsageExhausted(promotion.code.clone()));
    }

    if subtotal.minor() < promotion.min_order_minor {
        return Err(PromotionError::BelowMinimum {
            subtotal: subtotal.minor(),
            minimum: promotion.min_order_minor,
        });
    }

    let computed = promotion.kind.saving(promotion.value, subtotal);

    // The cap applies to both kinds; a discount can also never exceed the
    // subtotal itself.
    let capped = match promotion.max_discount_minor {
        Some(cap) => computed.minor().min(cap),
        None => computed.minor(),
    };

    Ok(Money::from_minor(capped.min(subtotal.minor()).max(0)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountKind;
    use chrono::Duration;

    fn promo(kind: DiscountKind, value: i64) -> Promotion {
        let now = Utc::now();
        Promotion {
            id: "p1".to_string(),
            code: "SALE10".to_string(),
            kind,
            value,
            min_order_minor: 0,
            max_discount_minor: None,
            usage_cap: 100,
            usage_count: 0,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(1),
            is_active: true,
        }
    }

    #[test]
    fn test_percentage_of_subtotal() {
        let p = promo(DiscountKind::Percentage, 10);
        let discount = evaluate(&p, Money::from_minor(500_000), Utc::now()).unwrap();
        assert_eq!(discount.minor(), 50_000);
    }

    #[test]
    fn test_fixed_amount() {
        let p = promo(DiscountKind::FixedAmount, 30_000);
        let discount = evaluate(&p, Money::from_minor(500_000), Utc::now()).unwrap();
        assert_eq!(discount.minor(), 30_000);
    }

    #[test]
    fn test_fixed_amount_never_exceeds_subtotal() {
        let p = promo(DiscountKind::FixedAmount, 800_000);
        let discount = evaluate(&p, Money::from_minor(500_000), Utc::now()).unwrap();
        assert_eq!(discount.minor(), 500_000);
    }

    #[test]
    fn test_cap_applies_to_percentage() {
        let mut p = promo(DiscountKind::Percentage, 50);
        p.max_discount_minor = Some(100_000);
        let discount = evaluate(&p, Money::from_minor(500_000), Utc::now()).unwrap();
        assert_eq!(discount.minor(), 100_000);
    }

    #[test]
    fn test_inactive_rejected() {
        let mut p = promo(DiscountKind::Percentage, 10);
        p.is_active = false;
        let err = evaluate(&p, Money::from_minor(500_000), Utc::now()).unwrap_err();
        assert!(matches!(err, PromotionError::Inactive(_)));
    }

    #[test]
    fn test_outside_window_rejected() {
        let p = promo(DiscountKind::Percentage, 10);
        let err = evaluate(
            &p,
            Money::from_minor(500_000),
            Utc::now() + Duration::days(30),
        )
        .unwrap_err();
        assert!(matches!(err, PromotionError::OutsideWindow(_)));
    }

    #[test]
    fn test_usage_exhausted_rejected() {
        let mut p = promo(DiscountKind::Percentage, 10);
        p.usage_count = p.usage_cap;
        let err = evaluate(&p, Money::from_minor(500_000), Utc::now()).unwrap_err();
        assert!(matches!(err, PromotionError::UsageExhausted(_)));
    }

    #[test]
    fn test_below_minimum_rejected() {
        let mut p = promo(DiscountKind::Percentage, 10);
        p.min_order_minor = 1_000_000;
        let err = evaluate(&p, Money::from_minor(500_000), Utc::now()).unwrap_err();
        assert_eq!(
            err,
            PromotionError::BelowMinimum {
                subtotal: 500_000,
                minimum: 1_000_000,
            }
        );
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let p = promo(DiscountKind::Percentage, 10);
        assert!(evaluate(&p, Money::from_minor(500_000), p.starts_at).is_ok());
        assert!(evaluate(&p, Money::from_minor(500_000), p.ends_at).is_ok());
    }
}
