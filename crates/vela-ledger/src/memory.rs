//! # In-Memory Ledger
//!
//! An authoritative in-memory implementation of all collaborator traits.
//!
//! ## Why It Exists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MemoryLedger                                     │
//! │                                                                         │
//! │  The register engine is specified against OUTCOME semantics: every      │
//! │  mutating call answers with authoritative state whose totals were       │
//! │  recomputed server-side. Exercising that contract needs a server.       │
//! │                                                                         │
//! │  MemoryLedger plays the server: it snapshots prices through the same    │
//! │  vela-core pricing resolver, re-evaluates promotions with the same      │
//! │  rule set, walks the same status machine, and enforces                  │
//! │                                                                         │
//! │      total == subtotal - discount + shipping_fee                        │
//! │                                                                         │
//! │  after every mutation. It also counts every call and can fail the       │
//! │  next one on demand, which is how the "zero network calls" and          │
//! │  rollback properties are asserted.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use vela_core::{
    lifecycle, pricing, promotion, validation, Address, Money, Order, OrderEvent, OrderLineItem,
    OrderStatus, Promotion, Variant, VariantDiscount,
};

use crate::api::{
    AddressResolver, CarrierQuoter, CheckoutOutcome, CheckoutRequest, CreateOrderRequest,
    OrderLedger, OrderListFilter, OrderPage, Parcel, RegionId, ZoneCode,
};
use crate::error::{LedgerError, LedgerResult};

/// Default page size when a filter does not specify one.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Carrier surcharge per started kilogram beyond the first.
const PER_EXTRA_KG_MINOR: i64 = 2_000;

// =============================================================================
// State
// =============================================================================

#[derive(Default)]
struct Inner {
    variants: HashMap<String, Variant>,
    discounts: HashMap<String, Vec<VariantDiscount>>,
    promotions: HashMap<String, Promotion>,
    orders: HashMap<String, Order>,
    // (province, district) -> region; (region, ward) -> zone; zone -> base fee
    regions: HashMap<(String, String), RegionId>,
    zones: HashMap<(String, String), ZoneCode>,
    zone_fees: HashMap<String, i64>,
    next_code: u64,
}

/// In-memory order ledger, address resolver, and carrier quoter.
pub struct MemoryLedger {
    inner: Mutex<Inner>,
    calls: AtomicU64,
    fail_next: Mutex<Option<String>>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        MemoryLedger {
            inner: Mutex::new(Inner::default()),
            calls: AtomicU64::new(0),
            fail_next: Mutex::new(None),
        }
    }

    // -------------------------------------------------------------------------
    // Catalog seeding
    // -------------------------------------------------------------------------

    pub fn insert_variant(&self, variant: Variant) {
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .variants
            .insert(variant.id.clone(), variant);
    }

    pub fn insert_discount(&self, discount: VariantDiscount) {
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .discounts
            .entry(discount.variant_id.clone())
            .or_default()
            .push(discount);
    }

    pub fn insert_promotion(&self, promotion: Promotion) {
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .promotions
            .insert(promotion.code.clone(), promotion);
    }

    /// Registers a deliverable route end to end.
    pub fn add_route(
        &self,
        province: &str,
        district: &str,
        region: &str,
        ward: &str,
        zone: &str,
        base_fee_minor: i64,
    ) {
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        inner.regions.insert(
            (province.to_string(), district.to_string()),
            RegionId(region.to_string()),
        );
        inner.zones.insert(
            (region.to_string(), ward.to_string()),
            ZoneCode(zone.to_string()),
        );
        inner.zone_fees.insert(zone.to_string(), base_fee_minor);
    }

    // -------------------------------------------------------------------------
    // Test instrumentation
    // -------------------------------------------------------------------------

    /// Number of collaborator calls issued so far (the network-call count).
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes the next collaborator call fail with the given service message.
    pub fn fail_next_call(&self, message: impl Into<String>) {
        *self.fail_next.lock().expect("ledger mutex poisoned") = Some(message.into());
    }

    /// Reads an order without counting as a network call (assertions only).
    pub fn peek_order(&self, order_id: &str) -> Option<Order> {
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .orders
            .get(order_id)
            .cloned()
    }

    /// Current stock of a variant (assertions only).
    pub fn peek_stock(&self, variant_id: &str) -> Option<i64> {
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .variants
            .get(variant_id)
            .map(|v| v.stock)
    }

    // -------------------------------------------------------------------------
    // External triggers (payment gateway / fulfillment backend simulation)
    // -------------------------------------------------------------------------

    /// Applies an externally-triggered lifecycle event to an order, the way
    /// the payment gateway or fulfillment backend would.
    pub fn apply_external_event(&self, order_id: &str, event: OrderEvent) -> LedgerResult<()> {
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        let order = inner
            .orders
            .get_mut(order_id)
            .ok_or_else(|| LedgerError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })?;
        order.status = lifecycle::transition(order.status, event)?;
        order.updated_at = Utc::now();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Shared plumbing
    // -------------------------------------------------------------------------

    /// Counts the call and pops any injected failure.
    fn begin(&self, op: &'static str) -> LedgerResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(op, "ledger call");
        if let Some(message) = self.fail_next.lock().expect("ledger mutex poisoned").take() {
            return Err(LedgerError::remote(message));
        }
        Ok(())
    }

    /// Server-side recomputation after any mutation.
    ///
    /// Subtotal from the frozen line snapshots, promotion discount from the
    /// stored record (eligibility was checked at apply time), then
    /// `total = subtotal - discount + shipping_fee`.
    fn recompute(order: &mut Order, promotions: &HashMap<String, Promotion>) {
        for item in &mut order.items {
            item.line_total_minor = item.computed_line_total_minor();
        }
        order.subtotal_minor = order.items.iter().map(|i| i.line_total_minor).sum();

        order.discount_minor = match &order.promotion_code {
            Some(code) => match promotions.get(code) {
                Some(p) => {
                    let subtotal = Money::from_minor(order.subtotal_minor);
                    let computed = p.kind.saving(p.value, subtotal);
                    let capped = match p.max_discount_minor {
                        Some(cap) => computed.minor().min(cap),
                        None => computed.minor(),
                    };
                    capped.min(order.subtotal_minor).max(0)
                }
                None => 0,
            },
            None => 0,
        };

        order.total_minor = order.subtotal_minor - order.discount_minor + order.shipping_fee_minor;
        order.updated_at = Utc::now();
        debug_assert!(order.money_invariant_holds());
    }

    fn editable(order: &Order) -> LedgerResult<()> {
        if order.status != OrderStatus::AwaitingPayment {
            return Err(LedgerError::remote(format!(
                "Order {} is no longer editable",
                order.code
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Order Ledger
// =============================================================================

#[async_trait]
impl OrderLedger for MemoryLedger {
    async fn create_draft(&self, req: CreateOrderRequest) -> LedgerResult<Order> {
        self.begin("create_draft")?;
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        inner.next_code += 1;
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            code: format!("VL-{:06}", inner.next_code),
            status: OrderStatus::AwaitingPayment,
            customer_id: req.customer_id,
            payment_method_id: None,
            items: Vec::new(),
            subtotal_minor: 0,
            promotion_code: None,
            discount_minor: 0,
            shipping_fee_minor: 0,
            total_minor: 0,
            note: req.note,
            cancel_reason: None,
            shipping_address: None,
            created_at: now,
            updated_at: now,
        };
        inner.orders.insert(order.id.clone(), order.clone());
        info!(order_id = %order.id, code = %order.code, "draft order created");
        Ok(order)
    }

    async fn fetch(&self, order_id: &str) -> LedgerResult<Order> {
        self.begin("fetch")?;
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })
    }

    async fn upsert_item(
        &self,
        order_id: &str,
        variant_id: &str,
        quantity: i64,
    ) -> LedgerResult<Order> {
        self.begin("upsert_item")?;
        validation::validate_quantity(quantity)?;
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        let Inner {
            orders,
            variants,
            discounts,
            promotions,
            ..
        } = &mut *inner;

        let order = orders.get_mut(order_id).ok_or_else(|| LedgerError::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
        Self::editable(order)?;

        if quantity == 0 {
            // Quantity 0 is logically equivalent to absence.
            order.items.retain(|i| i.variant_id != variant_id);
        } else {
            let variant = variants
                .get(variant_id)
                .ok_or_else(|| LedgerError::NotFound {
                    entity: "variant",
                    id: variant_id.to_string(),
                })?;
            let now = Utc::now();
            let empty = Vec::new();
            let records = discounts.get(variant_id).unwrap_or(&empty);
            let resolved = pricing::resolve_price(variant.price(), records, now);

            match order.items.iter_mut().find(|i| i.variant_id == variant_id) {
                // Replace, not increment: the absolute quantity wins. The
                // price snapshot from the first write stays frozen.
                Some(line) => line.quantity = quantity,
                None => order.items.push(OrderLineItem {
                    id: Uuid::new_v4().to_string(),
                    order_id: order_id.to_string(),
                    variant_id: variant_id.to_string(),
                    sku_snapshot: variant.sku.clone(),
                    name_snapshot: variant.name.clone(),
                    unit_price_minor: variant.price_minor,
                    discounted_unit_price_minor: resolved.final_minor,
                    quantity,
                    line_total_minor: resolved.final_minor * quantity,
                    weight_grams: variant.weight_grams,
                    created_at: now,
                }),
            }
        }

        Self::recompute(order, promotions);
        Ok(order.clone())
    }

    async fn remove_item(&self, order_id: &str, variant_id: &str) -> LedgerResult<Order> {
        self.upsert_item(order_id, variant_id, 0).await
    }

    async fn apply_promotion(&self, order_id: &str, code: &str) -> LedgerResult<Order> {
        self.begin("apply_promotion")?;
        let code = validation::validate_promotion_code(code)?.to_string();
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        let Inner {
            orders, promotions, ..
        } = &mut *inner;

        let order = orders.get_mut(order_id).ok_or_else(|| LedgerError::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
        if order.promotion_code.is_some() {
            return Err(vela_core::PromotionError::AlreadyApplied.into());
        }

        let promo = promotions
            .get_mut(&code)
            .ok_or_else(|| vela_core::PromotionError::NotFound(code.clone()))?;
        promotion::evaluate(promo, order.subtotal(), Utc::now())?;
        promo.usage_count += 1;

        order.promotion_code = Some(code);
        Self::recompute(order, promotions);
        Ok(order.clone())
    }

    async fn remove_promotion(&self, order_id: &str) -> LedgerResult<Order> {
        self.begin("remove_promotion")?;
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        let Inner {
            orders, promotions, ..
        } = &mut *inner;

        let order = orders.get_mut(order_id).ok_or_else(|| LedgerError::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
        if let Some(code) = order.promotion_code.take() {
            if let Some(promo) = promotions.get_mut(&code) {
                promo.usage_count = (promo.usage_count - 1).max(0);
            }
        }
        Self::recompute(order, promotions);
        Ok(order.clone())
    }

    async fn cancel(&self, order_id: &str, reason: &str) -> LedgerResult<()> {
        self.begin("cancel")?;
        let reason = validation::validate_cancel_reason(reason)?.to_string();
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        let Inner {
            orders, variants, ..
        } = &mut *inner;

        let order = orders.get_mut(order_id).ok_or_else(|| LedgerError::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
        order.status = lifecycle::transition(order.status, OrderEvent::Cancel)?;
        order.cancel_reason = Some(reason);
        order.updated_at = Utc::now();

        // Side effect beyond the status field: stock restoration. This is
        // why clients must re-fetch instead of assuming the new status.
        for item in &order.items {
            if let Some(variant) = variants.get_mut(&item.variant_id) {
                variant.stock += item.quantity;
            }
        }
        info!(order_id = %order_id, "order cancelled");
        Ok(())
    }

    async fn delete_draft(&self, order_id: &str) -> LedgerResult<()> {
        self.begin("delete_draft")?;
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        inner
            .orders
            .remove(order_id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })
    }

    async fn update_shipping(
        &self,
        order_id: &str,
        address: Address,
        fee_minor: i64,
    ) -> LedgerResult<Order> {
        self.begin("update_shipping")?;
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        let Inner {
            orders, promotions, ..
        } = &mut *inner;

        let order = orders.get_mut(order_id).ok_or_else(|| LedgerError::NotFound {
            entity: "order",
            id: order_id.to_string(),
        })?;
        // Address and fee land together or not at all.
        order.shipping_address = Some(address);
        order.shipping_fee_minor = fee_minor;
        Self::recompute(order, promotions);
        Ok(order.clone())
    }

    async fn list(&self, filter: OrderListFilter) -> LedgerResult<OrderPage> {
        self.begin("list")?;
        let inner = self.inner.lock().expect("ledger mutex poisoned");

        let mut matched: Vec<&Order> = inner
            .orders
            .values()
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .filter(|o| filter.created_from.map_or(true, |t| o.created_at >= t))
            .filter(|o| filter.created_to.map_or(true, |t| o.created_at <= t))
            .filter(|o| match &filter.search {
                Some(text) => {
                    let needle = text.to_lowercase();
                    o.code.to_lowercase().contains(&needle)
                        || o.customer_id
                            .as_deref()
                            .is_some_and(|c| c.to_lowercase().contains(&needle))
                }
                None => true,
            })
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as u64;
        let page = filter.page.max(1);
        let page_size = if filter.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            filter.page_size
        };
        let start = ((page - 1) * page_size) as usize;
        let orders = matched
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(OrderPage {
            orders,
            page,
            total,
        })
    }

    async fn checkout(
        &self,
        order_id: &str,
        req: CheckoutRequest,
    ) -> LedgerResult<CheckoutOutcome> {
        self.begin("checkout")?;
        let mut inner = self.inner.lock().expect("ledger mutex poisoned");
        let order = inner
            .orders
            .get_mut(order_id)
            .ok_or_else(|| LedgerError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })?;
        if order.items.is_empty() {
            return Err(LedgerError::remote("Cannot check out an empty order"));
        }
        order.payment_method_id = Some(req.payment_method_id.clone());

        // External gateways answer with a redirect; on-the-spot methods
        // confirm immediately.
        if req.payment_method_id.starts_with("gateway:") {
            Ok(CheckoutOutcome::Redirect {
                url: format!(
                    "https://pay.example/checkout/{}?return={}",
                    order.id,
                    req.return_url.unwrap_or_default()
                ),
            })
        } else {
            order.status = lifecycle::transition(order.status, OrderEvent::PaymentConfirmed)?;
            order.updated_at = Utc::now();
            Ok(CheckoutOutcome::Confirmed {
                order: order.clone(),
            })
        }
    }
}

// =============================================================================
// Address Resolution + Carrier Quotation
// =============================================================================

#[async_trait]
impl AddressResolver for MemoryLedger {
    async fn resolve_region(&self, province: &str, district: &str) -> LedgerResult<RegionId> {
        self.begin("resolve_region")?;
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .regions
            .get(&(province.to_string(), district.to_string()))
            .cloned()
            .ok_or_else(|| LedgerError::NotFound {
                entity: "region",
                id: format!("{}/{}", province, district),
            })
    }

    async fn resolve_zone(&self, region: &RegionId, ward: &str) -> LedgerResult<ZoneCode> {
        self.begin("resolve_zone")?;
        self.inner
            .lock()
            .expect("ledger mutex poisoned")
            .zones
            .get(&(region.0.clone(), ward.to_string()))
            .cloned()
            .ok_or_else(|| LedgerError::NotFound {
                entity: "zone",
                id: format!("{}/{}", region.0, ward),
            })
    }
}

#[async_trait]
impl CarrierQuoter for MemoryLedger {
    async fn quote(&self, zone: &ZoneCode, parcels: &[Parcel]) -> LedgerResult<i64> {
        self.begin("quote")?;
        let inner = self.inner.lock().expect("ledger mutex poisoned");
        let base = inner
            .zone_fees
            .get(&zone.0)
            .copied()
            .ok_or_else(|| LedgerError::NotFound {
                entity: "zone fee",
                id: zone.0.clone(),
            })?;
        let total_weight: i64 = parcels.iter().map(|p| p.total_weight_grams()).sum();
        // Base fee covers the first kilogram; each started kilogram beyond
        // it adds a surcharge.
        let extra_kg = (total_weight.saturating_sub(1000) + 999) / 1000;
        Ok(base + extra_kg * PER_EXTRA_KG_MINOR)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vela_core::DiscountKind;

    fn variant(id: &str, price: i64, weight: i64) -> Variant {
        let now = Utc::now();
        Variant {
            id: id.to_string(),
            product_id: "p1".to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Variant {}", id),
            price_minor: price,
            weight_grams: weight,
            stock: 100,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn active_discount(id: &str, variant_id: &str, kind: DiscountKind, value: i64) -> VariantDiscount {
        let now = Utc::now();
        VariantDiscount {
            id: id.to_string(),
            variant_id: variant_id.to_string(),
            name: format!("Campaign {}", id),
            kind,
            value,
            starts_at: now - Duration::hours(1),
            ends_at: now + Duration::hours(1),
            created_at: now - Duration::days(1),
        }
    }

    #[tokio::test]
    async fn test_upsert_is_replace_not_increment() {
        let ledger = MemoryLedger::new();
        ledger.insert_variant(variant("v1", 100_000, 200));

        let order = ledger.create_draft(CreateOrderRequest::default()).await.unwrap();
        let order = ledger.upsert_item(&order.id, "v1", 2).await.unwrap();
        assert_eq!(order.quantity_of("v1"), 2);

        // Submitting 3 means 3, not 5.
        let order = ledger.upsert_item(&order.id, "v1", 3).await.unwrap();
        assert_eq!(order.quantity_of("v1"), 3);
        assert_eq!(order.subtotal_minor, 300_000);
        assert!(order.money_invariant_holds());
    }

    #[tokio::test]
    async fn test_upsert_zero_removes_line() {
        let ledger = MemoryLedger::new();
        ledger.insert_variant(variant("v1", 100_000, 200));

        let order = ledger.create_draft(CreateOrderRequest::default()).await.unwrap();
        ledger.upsert_item(&order.id, "v1", 2).await.unwrap();
        let order = ledger.upsert_item(&order.id, "v1", 0).await.unwrap();
        assert!(order.items.is_empty());
        assert_eq!(order.subtotal_minor, 0);
    }

    #[tokio::test]
    async fn test_line_snapshots_variant_discount() {
        let ledger = MemoryLedger::new();
        ledger.insert_variant(variant("v1", 200_000, 200));
        ledger.insert_discount(active_discount("d1", "v1", DiscountKind::Percentage, 20));

        let order = ledger.create_draft(CreateOrderRequest::default()).await.unwrap();
        let order = ledger.upsert_item(&order.id, "v1", 2).await.unwrap();
        let line = order.line_for_variant("v1").unwrap();
        assert_eq!(line.unit_price_minor, 200_000);
        assert_eq!(line.discounted_unit_price_minor, 160_000);
        assert_eq!(order.subtotal_minor, 320_000);
    }

    #[tokio::test]
    async fn test_promotion_stacks_on_discounted_subtotal() {
        let now = Utc::now();
        let ledger = MemoryLedger::new();
        ledger.insert_variant(variant("v1", 500_000, 200));
        ledger.insert_promotion(Promotion {
            id: "p1".to_string(),
            code: "SALE10".to_string(),
            kind: DiscountKind::Percentage,
            value: 10,
            min_order_minor: 0,
            max_discount_minor: None,
            usage_cap: 10,
            usage_count: 0,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(1),
            is_active: true,
        });

        let order = ledger.create_draft(CreateOrderRequest::default()).await.unwrap();
        ledger.upsert_item(&order.id, "v1", 1).await.unwrap();
        let order = ledger.apply_promotion(&order.id, "SALE10").await.unwrap();
        assert_eq!(order.discount_minor, 50_000);
        assert_eq!(order.total_minor, 450_000);

        // Second code while one is attached must be rejected.
        let err = ledger.apply_promotion(&order.id, "SALE10").await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Promotion(vela_core::PromotionError::AlreadyApplied)
        ));

        let order = ledger.remove_promotion(&order.id).await.unwrap();
        assert_eq!(order.discount_minor, 0);
        assert_eq!(order.total_minor, 500_000);
    }

    #[tokio::test]
    async fn test_cancel_restores_stock_and_persists_reason() {
        let ledger = MemoryLedger::new();
        ledger.insert_variant(variant("v1", 100_000, 200));

        let order = ledger.create_draft(CreateOrderRequest::default()).await.unwrap();
        ledger.upsert_item(&order.id, "v1", 3).await.unwrap();
        let stock_before = ledger.peek_stock("v1").unwrap();

        ledger.cancel(&order.id, "Changed mind").await.unwrap();

        let cancelled = ledger.peek_order(&order.id).unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.cancel_reason.as_deref(), Some("Changed mind"));
        assert_eq!(ledger.peek_stock("v1").unwrap(), stock_before + 3);

        // Terminal: nothing may follow.
        let err = ledger.cancel(&order.id, "again").await.unwrap_err();
        assert!(matches!(err, LedgerError::Lifecycle(_)));
    }

    #[tokio::test]
    async fn test_fail_injection_hits_exactly_one_call() {
        let ledger = MemoryLedger::new();
        ledger.fail_next_call("Ledger is down");
        let err = ledger
            .create_draft(CreateOrderRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Ledger is down");
        // Next call succeeds again.
        assert!(ledger.create_draft(CreateOrderRequest::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let ledger = MemoryLedger::new();
        for _ in 0..3 {
            ledger.create_draft(CreateOrderRequest::default()).await.unwrap();
        }
        let page = ledger
            .list(OrderListFilter {
                status: Some(OrderStatus::AwaitingPayment),
                page: 1,
                page_size: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.orders.len(), 2);

        let none = ledger
            .list(OrderListFilter {
                status: Some(OrderStatus::Completed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(none.total, 0);
    }

    #[tokio::test]
    async fn test_quote_weight_surcharge() {
        let ledger = MemoryLedger::new();
        ledger.add_route("Hanoi", "Ba Dinh", "R-01", "Truc Bach", "Z-01", 25_000);

        let zone = ZoneCode("Z-01".to_string());
        // 800g: base fee only.
        let light = ledger
            .quote(&zone, &[Parcel { weight_grams: 400, quantity: 2 }])
            .await
            .unwrap();
        assert_eq!(light, 25_000);

        // 2.4kg: base + 2 started extra kilograms.
        let heavy = ledger
            .quote(&zone, &[Parcel { weight_grams: 800, quantity: 3 }])
            .await
            .unwrap();
        assert_eq!(heavy, 25_000 + 2 * PER_EXTRA_KG_MINOR);
    }
}
