//! # Register Engine
//!
//! Drives the multi-tab register session against the remote ledger.
//!
//! ## Submission Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Three-Phase Submission                              │
//! │                                                                         │
//! │  Phase 1 (lock held)    validate input, reject when busy, set busy,     │
//! │                         apply the optimistic edit, snapshot the line    │
//! │  Phase 2 (no lock)      ONE ledger call - the lock is never held        │
//! │                         across an await                                 │
//! │  Phase 3 (lock held)    clear busy, then either reconcile (replace      │
//! │                         the whole local order with the authoritative    │
//! │                         one) or roll the snapshotted line back          │
//! │                                                                         │
//! │  Local rejections in phase 1 leave the session untouched and issue      │
//! │  ZERO network calls.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use vela_core::{validation, Order};
use vela_ledger::{CheckoutOutcome, CheckoutRequest, CreateOrderRequest, OrderLedger};

use crate::error::{RegisterError, RegisterResult};
use crate::session::RegisterTab;

// =============================================================================
// Session State
// =============================================================================

struct SessionState {
    tabs: Vec<RegisterTab>,
    next_tab_id: u64,
}

impl SessionState {
    fn tab_mut(&mut self, tab_id: u64) -> RegisterResult<&mut RegisterTab> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or(RegisterError::TabNotFound(tab_id))
    }
}

// =============================================================================
// Register
// =============================================================================

/// The register engine: owns the tab session and talks to the ledger.
///
/// All methods take `&self`; the session lives behind a mutex and the lock
/// is never held across an await.
pub struct Register {
    ledger: Arc<dyn OrderLedger>,
    state: Mutex<SessionState>,
}

impl Register {
    pub fn new(ledger: Arc<dyn OrderLedger>) -> Self {
        Register {
            ledger,
            state: Mutex::new(SessionState {
                tabs: Vec::new(),
                next_tab_id: 1,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Tab management
    // -------------------------------------------------------------------------

    /// Opens a new empty tab. Purely local.
    pub fn open_tab(&self, label: impl Into<String>) -> u64 {
        let mut state = self.state.lock().expect("register mutex poisoned");
        let id = state.next_tab_id;
        state.next_tab_id += 1;
        state.tabs.push(RegisterTab::new(id, label));
        debug!(tab_id = id, "tab opened");
        id
    }

    /// Snapshot of one tab for rendering.
    pub fn tab(&self, tab_id: u64) -> Option<RegisterTab> {
        self.state
            .lock()
            .expect("register mutex poisoned")
            .tabs
            .iter()
            .find(|t| t.id == tab_id)
            .cloned()
    }

    /// Snapshot of all tabs for rendering.
    pub fn tabs(&self) -> Vec<RegisterTab> {
        self.state
            .lock()
            .expect("register mutex poisoned")
            .tabs
            .clone()
    }

    /// Switching to a tab re-fetches its bound order, so totals reflect any
    /// changes made elsewhere while the tab was in the background.
    pub async fn focus_tab(&self, tab_id: u64) -> RegisterResult<Option<Order>> {
        let order_id = {
            let mut state = self.state.lock().expect("register mutex poisoned");
            let tab = state.tab_mut(tab_id)?;
            match tab.order_id() {
                Some(id) => id.to_string(),
                // Unbound tab: nothing to refresh, zero network calls.
                None => return Ok(None),
            }
        };

        let order = self.ledger.fetch(&order_id).await?;
        let mut state = self.state.lock().expect("register mutex poisoned");
        let tab = state.tab_mut(tab_id)?;
        tab.replace_order(order.clone());
        Ok(Some(order))
    }

    /// Closes a tab. An unbound tab is removed locally with ZERO network
    /// calls; a bound tab deletes its draft order first.
    pub async fn close_tab(&self, tab_id: u64) -> RegisterResult<()> {
        let order_id = {
            let mut state = self.state.lock().expect("register mutex poisoned");
            let tab = state.tab_mut(tab_id)?;
            if tab.busy {
                return Err(RegisterError::OperationInFlight);
            }
            match tab.order_id() {
                Some(id) => {
                    let id = id.to_string();
                    tab.busy = true;
                    id
                }
                None => {
                    state.tabs.retain(|t| t.id != tab_id);
                    debug!(tab_id, "unbound tab closed locally");
                    return Ok(());
                }
            }
        };

        let result = self.ledger.delete_draft(&order_id).await;
        let mut state = self.state.lock().expect("register mutex poisoned");
        match result {
            Ok(()) => {
                state.tabs.retain(|t| t.id != tab_id);
                info!(tab_id, order_id = %order_id, "tab closed, draft deleted");
                Ok(())
            }
            Err(err) => {
                state.tab_mut(tab_id)?.busy = false;
                Err(err.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Line items
    // -------------------------------------------------------------------------

    /// Adds `delta` units of a variant to a tab.
    ///
    /// The ledger's upsert takes an ABSOLUTE quantity, so the engine reads
    /// the current quantity and submits `current + delta`. On the first item
    /// the draft order is created lazily.
    pub async fn add_item(
        &self,
        tab_id: u64,
        variant_id: &str,
        delta: i64,
    ) -> RegisterResult<Order> {
        let (order_id, target) = {
            let mut state = self.state.lock().expect("register mutex poisoned");
            let tab = state.tab_mut(tab_id)?;
            if tab.busy {
                return Err(RegisterError::OperationInFlight);
            }
            let current = tab
                .order
                .as_ref()
                .map_or(0, |o| o.quantity_of(variant_id));
            let target = current + delta;
            validation::validate_quantity(target)?;
            tab.busy = true;
            (tab.order_id().map(str::to_string), target)
        };

        // Lazy draft creation on the first item.
        let order_id = match order_id {
            Some(id) => id,
            None => match self.ledger.create_draft(CreateOrderRequest::default()).await {
                Ok(order) => {
                    let id = order.id.clone();
                    let mut state = self.state.lock().expect("register mutex poisoned");
                    state.tab_mut(tab_id)?.replace_order(order);
                    id
                }
                Err(err) => {
                    self.clear_busy(tab_id);
                    return Err(err.into());
                }
            },
        };

        let result = self.ledger.upsert_item(&order_id, variant_id, target).await;
        let mut state = self.state.lock().expect("register mutex poisoned");
        let tab = state.tab_mut(tab_id)?;
        tab.busy = false;
        match result {
            Ok(order) => {
                tab.replace_order(order.clone());
                Ok(order)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Sets the absolute quantity of a line, optimistically.
    ///
    /// The tab shows the new quantity at once; the ledger's answer either
    /// reconciles (authoritative order replaces the local copy) or rolls
    /// the edited line back, leaving other lines untouched. Anything at or
    /// below zero removes the line.
    pub async fn set_quantity(
        &self,
        tab_id: u64,
        variant_id: &str,
        quantity: i64,
    ) -> RegisterResult<Order> {
        let quantity = quantity.max(0);
        validation::validate_quantity(quantity)?;

        let (order_id, snapshot) = {
            let mut state = self.state.lock().expect("register mutex poisoned");
            let tab = state.tab_mut(tab_id)?;
            if tab.busy {
                return Err(RegisterError::OperationInFlight);
            }
            let order_id = tab
                .order_id()
                .ok_or(RegisterError::NoOrderBound)?
                .to_string();
            let snapshot = tab
                .snapshot_line(variant_id)
                .ok_or(RegisterError::NoOrderBound)?;
            tab.busy = true;
            tab.apply_optimistic_quantity(variant_id, quantity);
            (order_id, snapshot)
        };

        let result = self.ledger.upsert_item(&order_id, variant_id, quantity).await;
        let mut state = self.state.lock().expect("register mutex poisoned");
        let tab = state.tab_mut(tab_id)?;
        tab.busy = false;
        match result {
            Ok(order) => {
                tab.replace_order(order.clone());
                Ok(order)
            }
            Err(err) => {
                warn!(tab_id, variant_id, "quantity edit rejected, rolling back");
                tab.restore(snapshot);
                Err(err.into())
            }
        }
    }

    /// Quantity edit from a raw text field ("3", "abc", "1000").
    ///
    /// Parsing failures are rejected locally with zero network calls.
    pub async fn set_quantity_from_input(
        &self,
        tab_id: u64,
        variant_id: &str,
        raw: &str,
    ) -> RegisterResult<Order> {
        let quantity = validation::parse_quantity(raw)?;
        self.set_quantity(tab_id, variant_id, quantity).await
    }

    /// Removes a line entirely. Equivalent to setting quantity 0.
    pub async fn remove_item(&self, tab_id: u64, variant_id: &str) -> RegisterResult<Order> {
        self.set_quantity(tab_id, variant_id, 0).await
    }

    // -------------------------------------------------------------------------
    // Promotions
    // -------------------------------------------------------------------------

    /// Applies a promotion code to the tab's order.
    ///
    /// At most one promotion per order: when one is already attached the
    /// request is rejected locally, before any network call.
    pub async fn apply_promotion(&self, tab_id: u64, code: &str) -> RegisterResult<Order> {
        let code = validation::validate_promotion_code(code)?.to_string();

        let order_id = {
            let mut state = self.state.lock().expect("register mutex poisoned");
            let tab = state.tab_mut(tab_id)?;
            if tab.busy {
                return Err(RegisterError::OperationInFlight);
            }
            let order = tab.order.as_ref().ok_or(RegisterError::NoOrderBound)?;
            if order.promotion_code.is_some() {
                return Err(RegisterError::PromotionAttached);
            }
            let order_id = order.id.clone();
            tab.busy = true;
            order_id
        };

        let result = self.ledger.apply_promotion(&order_id, &code).await;
        self.settle(tab_id, result)
    }

    /// Removes the attached promotion, resetting the discount to zero.
    pub async fn remove_promotion(&self, tab_id: u64) -> RegisterResult<Order> {
        let order_id = self.begin_bound(tab_id)?;
        let result = self.ledger.remove_promotion(&order_id).await;
        self.settle(tab_id, result)
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Finalizes the tab's order.
    ///
    /// A confirmed outcome retires the tab locally; a redirect keeps the
    /// tab open until the payment gateway reports back.
    pub async fn checkout(
        &self,
        tab_id: u64,
        req: CheckoutRequest,
    ) -> RegisterResult<CheckoutOutcome> {
        let order_id = self.begin_bound(tab_id)?;
        let result = self.ledger.checkout(&order_id, req).await;

        let mut state = self.state.lock().expect("register mutex poisoned");
        match result {
            Ok(CheckoutOutcome::Confirmed { order }) => {
                state.tabs.retain(|t| t.id != tab_id);
                info!(tab_id, order_id = %order.id, "checkout confirmed, tab retired");
                Ok(CheckoutOutcome::Confirmed { order })
            }
            Ok(outcome) => {
                state.tab_mut(tab_id)?.busy = false;
                Ok(outcome)
            }
            Err(err) => {
                state.tab_mut(tab_id)?.busy = false;
                Err(err.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Shared plumbing
    // -------------------------------------------------------------------------

    /// Phase 1 for operations that need a bound, non-busy tab and no
    /// optimistic edit.
    fn begin_bound(&self, tab_id: u64) -> RegisterResult<String> {
        let mut state = self.state.lock().expect("register mutex poisoned");
        let tab = state.tab_mut(tab_id)?;
        if tab.busy {
            return Err(RegisterError::OperationInFlight);
        }
        let order_id = tab
            .order_id()
            .ok_or(RegisterError::NoOrderBound)?
            .to_string();
        tab.busy = true;
        Ok(order_id)
    }

    /// Phase 3 for operations without an optimistic edit: clear busy and
    /// reconcile on success.
    fn settle(
        &self,
        tab_id: u64,
        result: Result<Order, vela_ledger::LedgerError>,
    ) -> RegisterResult<Order> {
        let mut state = self.state.lock().expect("register mutex poisoned");
        let tab = state.tab_mut(tab_id)?;
        tab.busy = false;
        match result {
            Ok(order) => {
                tab.replace_order(order.clone());
                Ok(order)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn clear_busy(&self, tab_id: u64) {
        let mut state = self.state.lock().expect("register mutex poisoned");
        if let Some(tab) = state.tabs.iter_mut().find(|t| t.id == tab_id) {
            tab.busy = false;
        }
    }
}
