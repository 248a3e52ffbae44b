//! # Collaborator Interfaces
//!
//! Async traits for the services the order engine consumes, plus the
//! request/response types that cross them.
//!
//! ## Interface Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     External Collaborators                              │
//! │                                                                         │
//! │  OrderLedger          create/read/update draft orders, upsert/delete    │
//! │                       line items by (order, variant), apply/remove      │
//! │                       promotions, cancel with reason, checkout, list    │
//! │                                                                         │
//! │  AddressResolver      province/district → carrier region,               │
//! │                       region + ward → delivery zone                     │
//! │                                                                         │
//! │  CarrierQuoter        zone + parcels → shipping fee                     │
//! │                                                                         │
//! │  Mutating ledger calls return the AUTHORITATIVE order with totals       │
//! │  recomputed server-side. The one exception is `cancel`, which returns   │
//! │  nothing: cancellation triggers side effects (stock restoration,        │
//! │  refund initiation), so callers must re-fetch the order afterwards.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vela_core::{Address, Order, OrderStatus};

use crate::error::LedgerResult;

// =============================================================================
// Order Ledger
// =============================================================================

/// What goes into a freshly created draft order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: Option<String>,
    pub note: Option<String>,
}

/// Filter for paginated order listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListFilter {
    /// Restrict to one status.
    pub status: Option<OrderStatus>,
    /// Orders created at or after this instant.
    pub created_from: Option<DateTime<Utc>>,
    /// Orders created at or before this instant.
    pub created_to: Option<DateTime<Utc>>,
    /// Free-text search over order code and customer reference.
    pub search: Option<String>,
    /// Page number, 1-based.
    pub page: u32,
    /// Page size; the service caps this.
    pub page_size: u32,
}

/// One page of an order listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub page: u32,
    pub total: u64,
}

/// What the checkout finalization endpoint needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub payment_method_id: String,
    /// Where the gateway should send the buyer back to.
    pub return_url: Option<String>,
}

/// Outcome of checkout finalization.
///
/// External payment flows answer with a redirect URL; on-the-spot payment
/// methods acknowledge directly with the authoritative order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// Send the buyer to the external payment flow.
    Redirect { url: String },
    /// Payment acknowledged; the order has moved on.
    Confirmed { order: Order },
}

/// The remote order ledger.
///
/// Line item upsert identity is the pair `(order, variant)`; upsert is a
/// REPLACE of the absolute quantity, not an increment - callers read the
/// current quantity and submit `current + delta` themselves.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Creates an empty draft order.
    async fn create_draft(&self, req: CreateOrderRequest) -> LedgerResult<Order>;

    /// Fetches the full authoritative order detail.
    async fn fetch(&self, order_id: &str) -> LedgerResult<Order>;

    /// Creates or replaces the line for `variant_id` at the given absolute
    /// quantity. Quantity 0 removes the line. Returns the authoritative
    /// order with totals recomputed.
    async fn upsert_item(&self, order_id: &str, variant_id: &str, quantity: i64)
        -> LedgerResult<Order>;

    /// Removes the line for `variant_id`. Returns the authoritative order.
    async fn remove_item(&self, order_id: &str, variant_id: &str) -> LedgerResult<Order>;

    /// Applies a promotion code. The service enforces the full rule set and
    /// the at-most-one invariant. Returns the authoritative order.
    async fn apply_promotion(&self, order_id: &str, code: &str) -> LedgerResult<Order>;

    /// Removes the attached promotion, resetting the discount to zero.
    async fn remove_promotion(&self, order_id: &str) -> LedgerResult<Order>;

    /// Requests customer cancellation with a mandatory reason.
    ///
    /// Deliberately returns `()`: cancellation triggers server-side side
    /// effects beyond the status field, so callers must re-fetch instead of
    /// trusting any local guess.
    async fn cancel(&self, order_id: &str, reason: &str) -> LedgerResult<()>;

    /// Deletes a draft order (register tab closed).
    async fn delete_draft(&self, order_id: &str) -> LedgerResult<()>;

    /// Persists a new address and shipping fee as ONE atomic update. The
    /// service never stores an address paired with a stale fee.
    async fn update_shipping(
        &self,
        order_id: &str,
        address: Address,
        fee_minor: i64,
    ) -> LedgerResult<Order>;

    /// Paginated order listing with status/date/text filters.
    async fn list(&self, filter: OrderListFilter) -> LedgerResult<OrderPage>;

    /// Finalizes checkout for an order.
    async fn checkout(&self, order_id: &str, req: CheckoutRequest)
        -> LedgerResult<CheckoutOutcome>;
}

// =============================================================================
// Address Resolution
// =============================================================================

/// Carrier-specific region identifier (province/district level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionId(pub String);

/// Carrier-specific delivery zone code (ward level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCode(pub String);

/// Resolves free-text address parts to carrier identifiers.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Province + district names → carrier region.
    async fn resolve_region(&self, province: &str, district: &str) -> LedgerResult<RegionId>;

    /// Region + ward name → delivery zone code.
    async fn resolve_zone(&self, region: &RegionId, ward: &str) -> LedgerResult<ZoneCode>;
}

// =============================================================================
// Carrier Quotation
// =============================================================================

/// One line item's contribution to the parcel, for fee quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    /// Unit weight in grams (frozen on the line item).
    pub weight_grams: i64,
    /// Line quantity.
    pub quantity: i64,
}

impl Parcel {
    /// Aggregated weight of this line.
    pub fn total_weight_grams(&self) -> i64 {
        self.weight_grams * self.quantity
    }
}

/// Quotes a shipping fee for a destination zone.
#[async_trait]
pub trait CarrierQuoter: Send + Sync {
    /// Fee in minor units for delivering `parcels` to `zone`.
    async fn quote(&self, zone: &ZoneCode, parcels: &[Parcel]) -> LedgerResult<i64>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_weight_aggregation() {
        let p = Parcel {
            weight_grams: 250,
            quantity: 4,
        };
        assert_eq!(p.total_weight_grams(), 1000);
    }

    #[test]
    fn test_filter_default_is_unfiltered() {
        let f = OrderListFilter::default();
        assert!(f.status.is_none());
        assert!(f.search.is_none());
    }
}
