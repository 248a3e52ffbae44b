//! # Pricing Module
//!
//! Resolves the effective price of a variant from its time-windowed
//! discount records.
//!
//! ## Resolution Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Variant Price Resolution                             │
//! │                                                                         │
//! │  discount records ──► partition by `now`                                │
//! │                        │                                                │
//! │          ┌─────────────┼──────────────┐                                 │
//! │          ▼             ▼              ▼                                 │
//! │      expired        active        upcoming                              │
//! │     (ignored)         │          (earliest start reported               │
//! │                       │           when nothing is active)               │
//! │          ┌────────────┴────────────┐                                    │
//! │          ▼                         ▼                                    │
//! │      exactly one              two or more                               │
//! │      apply its formula        compute EVERY candidate price,            │
//! │      label = its name         winner = LOWEST price (greatest           │
//! │                               absolute saving, not greatest             │
//! │                               percentage), label = generic              │
//! │                               "multiple discounts"                      │
//! │                                                                         │
//! │  nearest_active_end = min(end) over ALL active records, independent     │
//! │  of which record won - it drives the "ends in" countdown                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! Ties (two records yielding the identical final price) resolve to the
//! earliest-created record. The price is the same either way; fixing the
//! pick keeps the output stable for the same input set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::VariantDiscount;

// =============================================================================
// Resolved Price
// =============================================================================

/// What the buyer-facing price widget needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    /// List price before any discount.
    pub original_minor: i64,

    /// Effective price after resolution. Equal to `original_minor` when no
    /// record is active.
    pub final_minor: i64,

    /// What to show next to the price.
    pub label: PriceLabel,

    /// Minimum `ends_at` among all active records - the soonest moment the
    /// shown price can change. Drives the expiry countdown.
    #[ts(as = "Option<String>")]
    pub nearest_active_end: Option<DateTime<Utc>>,

    /// Earliest upcoming `starts_at`, reported only when nothing is active.
    /// Drives the "starts in" countdown.
    #[ts(as = "Option<String>")]
    pub next_start: Option<DateTime<Utc>>,

    /// True when two or more records are active simultaneously.
    pub has_multiple_active: bool,
}

impl ResolvedPrice {
    /// Returns the final price as Money.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_minor(self.final_minor)
    }

    /// Absolute saving in minor units.
    pub fn saving_minor(&self) -> i64 {
        self.original_minor - self.final_minor
    }
}

/// Buyer-facing price annotation.
///
/// When several discounts are active at once the winner's identity is
/// intentionally hidden: internally a deterministic winner is still
/// computed, but the UI shows only a generic badge. Naming one campaign
/// while another is also lowering the price confuses buyers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum PriceLabel {
    /// No active discount; the list price stands.
    Regular,
    /// Exactly one active discount; show its campaign name.
    Named(String),
    /// Two or more active discounts; show a generic badge.
    MultipleDiscounts,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the effective price for a variant at `now`.
///
/// `discounts` is the variant's full record set; expired and upcoming
/// records are partitioned out here, so callers do not pre-filter.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use vela_core::money::Money;
/// use vela_core::pricing::resolve_price;
/// use vela_core::types::{DiscountKind, VariantDiscount};
///
/// let now = Utc::now();
/// let sale = VariantDiscount {
///     id: "d1".into(),
///     variant_id: "v1".into(),
///     name: "Mid-year sale".into(),
///     kind: DiscountKind::Percentage,
///     value: 20,
///     starts_at: now - Duration::hours(1),
///     ends_at: now + Duration::hours(1),
///     created_at: now - Duration::days(7),
/// };
/// let resolved = resolve_price(Money::from_minor(200_000), &[sale], now);
/// assert_eq!(resolved.final_minor, 160_000);
/// ```
pub fn resolve_price(
    original: Money,
    discounts: &[VariantDiscount],
    now: DateTime<Utc>,
) -> ResolvedPrice {
    let active: Vec<&VariantDiscount> =
        discounts.iter().filter(|d| d.is_active_at(now)).collect();

    // Nothing active: list price stands, but surface the earliest upcoming
    // start for the "starts in" countdown.
    if active.is_empty() {
        let next_start = discounts
            .iter()
            .filter(|d| d.is_upcoming_at(now))
            .map(|d| d.starts_at)
            .min();
        return ResolvedPrice {
            original_minor: original.minor(),
            final_minor: original.minor(),
            label: PriceLabel::Regular,
            nearest_active_end: None,
            next_start,
            has_multiple_active: false,
        };
    }

    // Candidate price per active record, computed independently. The winner
    // is the lowest resulting price; ties break on earliest created_at so
    // the same input set always resolves identically.
    let winner = active
        .iter()
        .min_by_key(|d| (d.kind.apply(d.value, original), d.created_at, d.id.as_str()))
        .copied()
        .unwrap_or(active[0]);
    let final_price = winner.kind.apply(winner.value, original);

    // The countdown is over ALL active windows, not the winner's: as soon
    // as any active record expires the resolved price may change.
    let nearest_active_end = active.iter().map(|d| d.ends_at).min();

    let label = if active.len() > 1 {
        PriceLabel::MultipleDiscounts
    } else {
        PriceLabel::Named(winner.name.clone())
    };

    ResolvedPrice {
        original_minor: original.minor(),
        final_minor: final_price.minor(),
        label,
        nearest_active_end,
        next_start: None,
        has_multiple_active: active.len() > 1,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountKind;
    use chrono::Duration;

    fn discount(
        id: &str,
        kind: DiscountKind,
        value: i64,
        starts: DateTime<Utc>,
        ends: DateTime<Utc>,
        created: DateTime<Utc>,
    ) -> VariantDiscount {
        VariantDiscount {
            id: id.to_string(),
            variant_id: "v1".to_string(),
            name: format!("Campaign {}", id),
            kind,
            value,
            starts_at: starts,
            ends_at: ends,
            created_at: created,
        }
    }

    #[test]
    fn test_no_records_price_stands() {
        let now = Utc::now();
        let resolved = resolve_price(Money::from_minor(200_000), &[], now);
        assert_eq!(resolved.final_minor, 200_000);
        assert_eq!(resolved.label, PriceLabel::Regular);
        assert!(resolved.nearest_active_end.is_none());
        assert!(resolved.next_start.is_none());
        assert!(!resolved.has_multiple_active);
    }

    #[test]
    fn test_expired_records_ignored() {
        let now = Utc::now();
        let expired = discount(
            "d1",
            DiscountKind::Percentage,
            50,
            now - Duration::days(10),
            now - Duration::days(1),
            now - Duration::days(20),
        );
        let resolved = resolve_price(Money::from_minor(200_000), &[expired], now);
        assert_eq!(resolved.final_minor, 200_000);
        assert_eq!(resolved.label, PriceLabel::Regular);
    }

    #[test]
    fn test_upcoming_only_reports_next_start() {
        let now = Utc::now();
        let later = discount(
            "d1",
            DiscountKind::Percentage,
            30,
            now + Duration::days(3),
            now + Duration::days(10),
            now,
        );
        let sooner = discount(
            "d2",
            DiscountKind::Percentage,
            10,
            now + Duration::days(1),
            now + Duration::days(2),
            now,
        );
        let resolved = resolve_price(Money::from_minor(200_000), &[later, sooner.clone()], now);
        assert_eq!(resolved.final_minor, 200_000);
        assert_eq!(resolved.next_start, Some(sooner.starts_at));
    }

    #[test]
    fn test_single_percentage() {
        let now = Utc::now();
        let d = discount(
            "d1",
            DiscountKind::Percentage,
            20,
            now - Duration::hours(1),
            now + Duration::hours(1),
            now - Duration::days(1),
        );
        let resolved = resolve_price(Money::from_minor(200_000), &[d.clone()], now);
        assert_eq!(resolved.final_minor, 160_000);
        assert_eq!(resolved.label, PriceLabel::Named(d.name));
        assert_eq!(resolved.nearest_active_end, Some(d.ends_at));
        assert!(!resolved.has_multiple_active);
    }

    #[test]
    fn test_single_fixed_amount_clamps_at_zero() {
        let now = Utc::now();
        let d = discount(
            "d1",
            DiscountKind::FixedAmount,
            250_000,
            now - Duration::hours(1),
            now + Duration::hours(1),
            now,
        );
        let resolved = resolve_price(Money::from_minor(200_000), &[d], now);
        assert_eq!(resolved.final_minor, 0);
    }

    #[test]
    fn test_overlapping_lowest_price_wins() {
        // 200,000 with 20% (→160,000) and 50,000 off (→150,000):
        // the fixed amount wins on absolute saving.
        let now = Utc::now();
        let pct = discount(
            "d1",
            DiscountKind::Percentage,
            20,
            now - Duration::hours(2),
            now + Duration::hours(2),
            now - Duration::days(2),
        );
        let fixed = discount(
            "d2",
            DiscountKind::FixedAmount,
            50_000,
            now - Duration::hours(1),
            now + Duration::hours(1),
            now - Duration::days(1),
        );
        let resolved = resolve_price(Money::from_minor(200_000), &[pct, fixed], now);
        assert_eq!(resolved.final_minor, 150_000);
        assert!(resolved.has_multiple_active);
        assert_eq!(resolved.label, PriceLabel::MultipleDiscounts);
    }

    #[test]
    fn test_overlapping_min_over_all_candidates() {
        let now = Utc::now();
        let records = vec![
            discount(
                "d1",
                DiscountKind::Percentage,
                5,
                now - Duration::hours(1),
                now + Duration::hours(9),
                now - Duration::days(3),
            ),
            discount(
                "d2",
                DiscountKind::Percentage,
                25,
                now - Duration::hours(1),
                now + Duration::hours(5),
                now - Duration::days(2),
            ),
            discount(
                "d3",
                DiscountKind::FixedAmount,
                10_000,
                now - Duration::hours(1),
                now + Duration::hours(7),
                now - Duration::days(1),
            ),
        ];
        let resolved = resolve_price(Money::from_minor(100_000), &records, now);
        // Candidates: 95,000 / 75,000 / 90,000 → min is 75,000.
        assert_eq!(resolved.final_minor, 75_000);
    }

    #[test]
    fn test_nearest_active_end_independent_of_winner() {
        let now = Utc::now();
        // The losing record ends sooner; the countdown must still use it.
        let big_long = discount(
            "d1",
            DiscountKind::Percentage,
            30,
            now - Duration::hours(1),
            now + Duration::days(5),
            now - Duration::days(2),
        );
        let small_short = discount(
            "d2",
            DiscountKind::Percentage,
            5,
            now - Duration::hours(1),
            now + Duration::hours(2),
            now - Duration::days(1),
        );
        let resolved = resolve_price(
            Money::from_minor(100_000),
            &[big_long, small_short.clone()],
            now,
        );
        assert_eq!(resolved.final_minor, 70_000);
        assert_eq!(resolved.nearest_active_end, Some(small_short.ends_at));
    }

    #[test]
    fn test_tie_breaks_to_earliest_created() {
        let now = Utc::now();
        // 10% of 100,000 and 10,000 off both land on 90,000.
        let older = discount(
            "d1",
            DiscountKind::Percentage,
            10,
            now - Duration::hours(1),
            now + Duration::hours(1),
            now - Duration::days(5),
        );
        let newer = discount(
            "d2",
            DiscountKind::FixedAmount,
            10_000,
            now - Duration::hours(1),
            now + Duration::hours(1),
            now - Duration::days(1),
        );
        // Same final price regardless of order; resolution must be stable.
        let a = resolve_price(
            Money::from_minor(100_000),
            &[older.clone(), newer.clone()],
            now,
        );
        let b = resolve_price(Money::from_minor(100_000), &[newer, older], now);
        assert_eq!(a.final_minor, 90_000);
        assert_eq!(a, b);
    }
}
