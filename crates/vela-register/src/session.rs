//! # Register Tabs
//!
//! In-memory state for a multi-tab register session.
//!
//! ## Tab Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RegisterTab                                      │
//! │                                                                         │
//! │   open_tab()          first add_item()           close_tab()            │
//! │   ┌─────────┐   ┌──────────────────────┐   ┌───────────────────┐       │
//! │   │ unbound │──►│ bound to draft order │──►│ draft deleted,    │       │
//! │   │ (empty) │   │ (lazy creation)      │   │ tab removed       │       │
//! │   └─────────┘   └──────────────────────┘   └───────────────────┘       │
//! │        │                                            ▲                   │
//! │        └────────────────────────────────────────────┘                   │
//! │          closing an unbound tab is purely local: ZERO network calls     │
//! │                                                                         │
//! │  Quantity edits are optimistic: the tab shows the new quantity at       │
//! │  once, a line-scoped snapshot is kept, and the ledger's answer either   │
//! │  replaces the whole order (reconcile) or restores the snapshot          │
//! │  (rollback). Other lines are never touched by the rollback.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use vela_core::{Order, OrderLineItem};

// =============================================================================
// Line Snapshot
// =============================================================================

/// The state of one line before an optimistic edit.
///
/// `line: None` records that the variant had no line, so rollback means
/// removal rather than restoration.
#[derive(Debug, Clone)]
pub struct LineSnapshot {
    pub variant_id: String,
    pub line: Option<OrderLineItem>,
    /// Display totals before the edit, restored alongside the line.
    pub subtotal_minor: i64,
    pub total_minor: i64,
}

// =============================================================================
// Register Tab
// =============================================================================

/// One open register tab (one concurrent customer).
#[derive(Debug, Clone)]
pub struct RegisterTab {
    /// Session-local tab id, never reused within a session.
    pub id: u64,

    /// Display label ("Tab 1", a customer name, ...).
    pub label: String,

    /// The draft order bound to this tab. `None` until the first item is
    /// added - empty tabs cost nothing remotely.
    pub order: Option<Order>,

    /// A submission for this tab is in flight; further submissions are
    /// rejected until it settles.
    pub busy: bool,
}

impl RegisterTab {
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        RegisterTab {
            id,
            label: label.into(),
            order: None,
            busy: false,
        }
    }

    /// Whether a draft order is bound to this tab.
    pub fn is_bound(&self) -> bool {
        self.order.is_some()
    }

    /// The bound order's id, if any.
    pub fn order_id(&self) -> Option<&str> {
        self.order.as_ref().map(|o| o.id.as_str())
    }

    /// Takes a line-scoped snapshot before an optimistic edit.
    pub fn snapshot_line(&self, variant_id: &str) -> Option<LineSnapshot> {
        self.order.as_ref().map(|order| LineSnapshot {
            variant_id: variant_id.to_string(),
            line: order.line_for_variant(variant_id).cloned(),
            subtotal_minor: order.subtotal_minor,
            total_minor: order.total_minor,
        })
    }

    /// Applies a quantity edit to the local copy immediately, before the
    /// ledger has answered. Quantity 0 removes the line. Display totals are
    /// re-derived locally; they are provisional until reconciliation.
    pub fn apply_optimistic_quantity(&mut self, variant_id: &str, quantity: i64) {
        let Some(order) = self.order.as_mut() else {
            return;
        };
        if quantity <= 0 {
            order.items.retain(|i| i.variant_id != variant_id);
        } else if let Some(line) = order.items.iter_mut().find(|i| i.variant_id == variant_id) {
            line.quantity = quantity;
            line.line_total_minor = line.computed_line_total_minor();
        }
        Self::refresh_display_totals(order);
    }

    /// Restores the snapshotted line after a failed submission. Lines other
    /// than the snapshotted one are left exactly as they are.
    pub fn restore(&mut self, snapshot: LineSnapshot) {
        let Some(order) = self.order.as_mut() else {
            return;
        };
        order.items.retain(|i| i.variant_id != snapshot.variant_id);
        if let Some(line) = snapshot.line {
            order.items.push(line);
        }
        order.subtotal_minor = snapshot.subtotal_minor;
        order.total_minor = snapshot.total_minor;
    }

    /// Reconciliation: the ledger's authoritative order replaces the local
    /// copy wholesale.
    pub fn replace_order(&mut self, order: Order) {
        self.order = Some(order);
    }

    /// Provisional display totals between the optimistic edit and the
    /// ledger's answer. Keeps the discount and shipping fee as last known.
    fn refresh_display_totals(order: &mut Order) {
        order.subtotal_minor = order.items.iter().map(|i| i.line_total_minor).sum();
        order.total_minor =
            order.subtotal_minor - order.discount_minor + order.shipping_fee_minor;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vela_core::OrderStatus;

    fn order_with_lines(lines: Vec<(&str, i64, i64)>) -> Order {
        let now = Utc::now();
        let items: Vec<OrderLineItem> = lines
            .into_iter()
            .map(|(variant_id, unit, qty)| OrderLineItem {
                id: format!("line-{}", variant_id),
                order_id: "o1".to_string(),
                variant_id: variant_id.to_string(),
                sku_snapshot: format!("SKU-{}", variant_id),
                name_snapshot: variant_id.to_string(),
                unit_price_minor: unit,
                discounted_unit_price_minor: unit,
                quantity: qty,
                line_total_minor: unit * qty,
                weight_grams: 100,
                created_at: now,
            })
            .collect();
        let subtotal: i64 = items.iter().map(|i| i.line_total_minor).sum();
        Order {
            id: "o1".to_string(),
            code: "VL-000001".to_string(),
            status: OrderStatus::AwaitingPayment,
            customer_id: None,
            payment_method_id: None,
            items,
            subtotal_minor: subtotal,
            promotion_code: None,
            discount_minor: 0,
            shipping_fee_minor: 0,
            total_minor: subtotal,
            note: None,
            cancel_reason: None,
            shipping_address: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_optimistic_edit_and_rollback_is_line_scoped() {
        let mut tab = RegisterTab::new(1, "Tab 1");
        tab.order = Some(order_with_lines(vec![("v1", 100_000, 2), ("v2", 50_000, 1)]));

        let snapshot = tab.snapshot_line("v1").unwrap();
        tab.apply_optimistic_quantity("v1", 5);
        assert_eq!(tab.order.as_ref().unwrap().quantity_of("v1"), 5);
        assert_eq!(tab.order.as_ref().unwrap().subtotal_minor, 550_000);

        // Another line changes while the submission is in flight.
        tab.order.as_mut().unwrap().items[1].quantity = 3;

        tab.restore(snapshot);
        let order = tab.order.as_ref().unwrap();
        assert_eq!(order.quantity_of("v1"), 2);
        // The concurrent edit to v2 survives the rollback.
        assert_eq!(order.quantity_of("v2"), 3);
        assert_eq!(order.subtotal_minor, 250_000);
    }

    #[test]
    fn test_optimistic_zero_removes_and_rollback_restores() {
        let mut tab = RegisterTab::new(1, "Tab 1");
        tab.order = Some(order_with_lines(vec![("v1", 100_000, 2)]));

        let snapshot = tab.snapshot_line("v1").unwrap();
        tab.apply_optimistic_quantity("v1", 0);
        assert!(tab.order.as_ref().unwrap().items.is_empty());

        tab.restore(snapshot);
        assert_eq!(tab.order.as_ref().unwrap().quantity_of("v1"), 2);
    }

    #[test]
    fn test_unbound_tab_has_no_snapshot() {
        let tab = RegisterTab::new(1, "Tab 1");
        assert!(!tab.is_bound());
        assert!(tab.snapshot_line("v1").is_none());
    }
}
