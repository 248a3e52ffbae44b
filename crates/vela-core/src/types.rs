//! # Domain Types
//!
//! Core domain types used throughout the Vela order engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Variant      │   │     Order       │   │ OrderLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  order_id (FK)  │       │
//! │  │  sku (business) │   │  code (human)   │   │  variant_id     │       │
//! │  │  price_minor    │   │  status         │   │  quantity       │       │
//! │  │  weight_grams   │   │  total_minor    │   │  line_total     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ VariantDiscount │   │   Promotion     │   │  DiscountKind   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  [starts, ends] │   │  code           │   │  Percentage     │       │
//! │  │  kind + value   │   │  usage cap      │   │  FixedAmount    │       │
//! │  │  may overlap!   │   │  min order, cap │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for service relations
//! - Business ID: (sku, order code, promotion code) - human-readable
//!
//! Line items are the exception: their identity for upsert purposes is the
//! pair `(order_id, variant_id)`, never a client-chosen line id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Kind
// =============================================================================

/// How a discount value reduces a price.
///
/// Shared by per-variant time-windowed discounts and order-level promotion
/// codes: both use the same two formulas, only the base amount differs
/// (variant price vs. order subtotal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Value is a whole percentage (20 = 20% off).
    Percentage,
    /// Value is a fixed amount in minor units, clamped so the result
    /// never goes below zero.
    FixedAmount,
}

impl DiscountKind {
    /// Applies a discount of this kind to an amount.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    /// use vela_core::types::DiscountKind;
    ///
    /// let price = Money::from_minor(200_000);
    /// assert_eq!(DiscountKind::Percentage.apply(20, price).minor(), 160_000);
    /// assert_eq!(DiscountKind::FixedAmount.apply(50_000, price).minor(), 150_000);
    /// ```
    pub fn apply(&self, value: i64, amount: Money) -> Money {
        match self {
            DiscountKind::Percentage => amount - amount.percent_of(value.max(0) as u32),
            DiscountKind::FixedAmount => amount.saturating_sub(Money::from_minor(value)),
        }
    }

    /// The amount saved when applying this discount (always >= 0).
    pub fn saving(&self, value: i64, amount: Money) -> Money {
        amount - self.apply(value, amount)
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A sellable product variant (one color/size combination).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Variant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product this variant belongs to.
    pub product_id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown to buyer and on the register.
    pub name: String,

    /// List price in minor units before any discount.
    pub price_minor: i64,

    /// Unit weight in grams, used for carrier fee quotation.
    pub weight_grams: i64,

    /// Current stock level.
    pub stock: i64,

    /// Whether the variant is active (soft delete).
    pub is_active: bool,

    /// When the variant was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the variant was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Variant {
    /// Returns the list price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price_minor)
    }
}

// =============================================================================
// Variant Discount
// =============================================================================

/// A time-windowed price reduction tied to a single variant.
///
/// A variant may carry many historical, current, and future records, and
/// windows may overlap - that is expected, not an error. Overlaps are
/// resolved by [`crate::pricing::resolve_price`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantDiscount {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Variant this discount applies to.
    pub variant_id: String,

    /// Campaign name shown to the buyer when this is the only active record.
    pub name: String,

    /// Percentage or fixed amount.
    pub kind: DiscountKind,

    /// Whole percent for Percentage, minor units for FixedAmount.
    pub value: i64,

    /// Window start (inclusive).
    #[ts(as = "String")]
    pub starts_at: DateTime<Utc>,

    /// Window end (inclusive).
    #[ts(as = "String")]
    pub ends_at: DateTime<Utc>,

    /// Creation time, used as the deterministic tie-break when two active
    /// records yield the same price.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl VariantDiscount {
    /// Whether this record is active at `now` (inclusive on both ends).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now <= self.ends_at
    }

    /// Whether this record starts in the future relative to `now`.
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at > now
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// A time-windowed, usage-capped, order-level discount activated by a code.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Promotion {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The code the customer types ("SALE10").
    pub code: String,

    /// Percentage or fixed amount, applied to the order subtotal.
    pub kind: DiscountKind,

    /// Whole percent for Percentage, minor units for FixedAmount.
    pub value: i64,

    /// Minimum order subtotal to qualify.
    pub min_order_minor: i64,

    /// Maximum discount amount. Applies even to the percentage kind.
    /// `None` means uncapped.
    pub max_discount_minor: Option<i64>,

    /// How many times the code may be used in total.
    pub usage_cap: i64,

    /// How many times the code has been used. Invariant: <= usage_cap.
    pub usage_count: i64,

    /// Window start (inclusive).
    #[ts(as = "String")]
    pub starts_at: DateTime<Utc>,

    /// Window end (inclusive).
    #[ts(as = "String")]
    pub ends_at: DateTime<Utc>,

    /// Whether the promotion is switched on at all.
    pub is_active: bool,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a customer order.
///
/// Transitions between these states are governed exclusively by
/// [`crate::lifecycle::transition`]; nothing else may change a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed online, waiting for the payment gateway to confirm.
    AwaitingPayment,
    /// Paid, waiting for the fulfillment backend to pick it up.
    PendingProcessing,
    /// Fulfillment confirmed the order.
    Confirmed,
    /// Items being picked and packed.
    Preparing,
    /// Handed to the carrier.
    Shipping,
    /// Carrier reported delivery.
    Delivered,
    /// Finished. Terminal.
    Completed,
    /// Fulfillment found insufficient stock; customer may cancel.
    OutOfStock,
    /// Cancelled. Terminal. `Order::cancel_reason` is set.
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::AwaitingPayment
    }
}

// =============================================================================
// Address
// =============================================================================

/// A shipping destination.
///
/// Province/district/ward names are resolved to carrier-specific region and
/// zone identifiers by the address resolution service; this type only
/// carries what the customer typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub recipient: String,
    pub phone: String,
    pub province: String,
    pub district: String,
    pub ward: String,
    pub street: String,
}

// =============================================================================
// Order Line Item
// =============================================================================

/// One product-variant-and-quantity entry within an order.
///
/// Uses the snapshot pattern to freeze variant data at time of sale: the
/// unit price, the discounted unit price, and the weight are captured when
/// the line is written and never re-read from the catalog.
///
/// Quantity 0 is logically equivalent to absence; the ledger removes such
/// lines rather than storing them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineItem {
    pub id: String,
    pub order_id: String,
    pub variant_id: String,
    /// SKU at time of sale (frozen).
    pub sku_snapshot: String,
    /// Variant name at time of sale (frozen).
    pub name_snapshot: String,
    /// List unit price in minor units at time of sale (frozen).
    pub unit_price_minor: i64,
    /// Unit price after variant-level discount resolution (frozen).
    pub discounted_unit_price_minor: i64,
    /// Quantity ordered (>= 0).
    pub quantity: i64,
    /// Line total = discounted unit price × quantity.
    pub line_total_minor: i64,
    /// Unit weight in grams at time of sale, for carrier quotes (frozen).
    pub weight_grams: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderLineItem {
    /// Returns the discounted unit price as Money.
    #[inline]
    pub fn discounted_unit_price(&self) -> Money {
        Money::from_minor(self.discounted_unit_price_minor)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_minor(self.line_total_minor)
    }

    /// Recomputes the line total from the frozen unit price and quantity.
    pub fn computed_line_total_minor(&self) -> i64 {
        self.discounted_unit_price_minor * self.quantity
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer's purchase record (invoice) with line items, status, and
/// computed totals.
///
/// ## Money Invariant
/// `total_minor == subtotal_minor - discount_minor + shipping_fee_minor`,
/// always recomputed by the ledger after any mutation. Clients never derive
/// a total they subsequently trust without re-fetching.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable order code ("VL-20260815-0042").
    pub code: String,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Customer reference (absent for anonymous register sales).
    pub customer_id: Option<String>,

    /// Payment method reference.
    pub payment_method_id: Option<String>,

    /// Ordered line items, unique by variant_id.
    pub items: Vec<OrderLineItem>,

    /// Sum of line totals (after per-variant discounts).
    pub subtotal_minor: i64,

    /// Applied promotion code. At most one per order.
    pub promotion_code: Option<String>,

    /// Order-level discount amount from the promotion.
    pub discount_minor: i64,

    /// Carrier shipping fee.
    pub shipping_fee_minor: i64,

    /// Total payable. See the money invariant above.
    pub total_minor: i64,

    /// Free-text note from the customer.
    pub note: Option<String>,

    /// Cancellation reason. Present only when the order reached Cancelled
    /// via customer cancellation.
    pub cancel_reason: Option<String>,

    /// Shipping destination.
    pub shipping_address: Option<Address>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the total payable as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_minor)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor(self.subtotal_minor)
    }

    /// Finds a line item by variant id.
    pub fn line_for_variant(&self, variant_id: &str) -> Option<&OrderLineItem> {
        self.items.iter().find(|i| i.variant_id == variant_id)
    }

    /// Current quantity for a variant (0 when absent - the two are
    /// logically equivalent).
    pub fn quantity_of(&self, variant_id: &str) -> i64 {
        self.line_for_variant(variant_id).map_or(0, |i| i.quantity)
    }

    /// Checks the money invariant. The ledger enforces it; clients may
    /// assert it when receiving authoritative state.
    pub fn money_invariant_holds(&self) -> bool {
        self.total_minor == self.subtotal_minor - self.discount_minor + self.shipping_fee_minor
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_kind_percentage() {
        let price = Money::from_minor(200_000);
        assert_eq!(DiscountKind::Percentage.apply(20, price).minor(), 160_000);
        assert_eq!(DiscountKind::Percentage.saving(20, price).minor(), 40_000);
    }

    #[test]
    fn test_discount_kind_fixed_amount_clamps() {
        let price = Money::from_minor(40_000);
        assert_eq!(DiscountKind::FixedAmount.apply(50_000, price), Money::zero());
        assert_eq!(
            DiscountKind::FixedAmount.saving(50_000, price).minor(),
            40_000
        );
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::AwaitingPayment.is_terminal());
        assert!(!OrderStatus::OutOfStock.is_terminal());
    }

    #[test]
    fn test_discount_window_bounds_inclusive() {
        let now = Utc::now();
        let d = VariantDiscount {
            id: "d1".into(),
            variant_id: "v1".into(),
            name: "Summer".into(),
            kind: DiscountKind::Percentage,
            value: 10,
            starts_at: now,
            ends_at: now,
            created_at: now,
        };
        assert!(d.is_active_at(now));
        assert!(!d.is_upcoming_at(now));
    }
}
