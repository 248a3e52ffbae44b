//! # Customer Cancellation
//!
//! The cancel-with-reason flow for the buyer's order history screen.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Validate the reason locally (trimmed, non-empty, length-capped).    │
//! │     Rejection here means ZERO network calls.                            │
//! │  2. Check the status admits cancellation. Same: local, zero calls.      │
//! │  3. Mark the order in-flight; a second tap while the first request      │
//! │     is pending is rejected, not queued.                                 │
//! │  4. ledger.cancel - the service re-checks everything and runs its       │
//! │     side effects (stock restoration, refund initiation).                │
//! │  5. Re-fetch. The service's answer to `cancel` is deliberately empty;   │
//! │     only the re-fetched order is trusted.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::info;

use vela_core::{lifecycle, validation, LifecycleError, Order, OrderEvent};
use vela_ledger::OrderLedger;

use crate::error::{RegisterError, RegisterResult};

/// Drives customer cancellations against the ledger.
pub struct Canceller {
    ledger: Arc<dyn OrderLedger>,
    /// Order ids with a cancellation currently in flight.
    in_flight: Mutex<HashSet<String>>,
}

impl Canceller {
    pub fn new(ledger: Arc<dyn OrderLedger>) -> Self {
        Canceller {
            ledger,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Whether the cancel action should be offered for this order at all.
    pub fn can_cancel(order: &Order) -> bool {
        lifecycle::can_cancel(order.status)
    }

    /// Cancels an order with a mandatory reason and returns the re-fetched
    /// authoritative order.
    pub async fn cancel_order(&self, order: &Order, reason: &str) -> RegisterResult<Order> {
        let reason = validation::validate_cancel_reason(reason)?.to_string();

        if !lifecycle::can_cancel(order.status) {
            return Err(LifecycleError::IllegalTransition {
                from: order.status,
                event: OrderEvent::Cancel.name().to_string(),
            }
            .into());
        }

        {
            let mut in_flight = self.in_flight.lock().expect("canceller mutex poisoned");
            if !in_flight.insert(order.id.clone()) {
                return Err(RegisterError::OperationInFlight);
            }
        }

        let result = self.ledger.cancel(&order.id, &reason).await;
        self.in_flight
            .lock()
            .expect("canceller mutex poisoned")
            .remove(&order.id);

        result?;
        info!(order_id = %order.id, "cancellation accepted, re-fetching");
        // Cancellation has side effects beyond the status field; only the
        // re-fetched order is authoritative.
        Ok(self.ledger.fetch(&order.id).await?)
    }
}
