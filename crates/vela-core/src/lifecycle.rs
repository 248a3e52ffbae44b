//! # Order Lifecycle Module
//!
//! The finite-state progression of a customer order, from placement to
//! fulfillment or cancellation.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Status Transitions                            │
//! │                                                                         │
//! │  AwaitingPayment ──PaymentConfirmed──► PendingProcessing                │
//! │        │                                    │                           │
//! │        │ Cancel                             │ Advance                   │
//! │        ▼                                    ▼                           │
//! │    Cancelled ◄──Cancel── PendingProcessing  Confirmed ──Advance──►      │
//! │        ▲                       │            Preparing ──Advance──►      │
//! │        │ Cancel                │ Stock      Shipping  ──Advance──►      │
//! │        │                       ▼ Exhausted  Delivered ──Advance──►      │
//! │    OutOfStock ◄────────────────┘            Completed (terminal)        │
//! │                                                                         │
//! │  • PaymentConfirmed / Advance / StockExhausted are EXTERNAL triggers    │
//! │    (payment gateway, fulfillment backend), never user-initiated here    │
//! │  • Cancel is customer-initiated and requires a non-empty reason,        │
//! │    validated before any network call                                    │
//! │  • No transition leaves Completed or Cancelled                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design
//! The status-to-behavior dispatch is an explicit tagged union plus a pure
//! transition function `(state, event) -> Result<state, LifecycleError>`.
//! UI-facing metadata (label, badge, description) lives in a separate
//! lookup keyed by the same tag and is never coupled to transition logic.

use crate::error::LifecycleError;
use crate::types::OrderStatus;

// =============================================================================
// Events
// =============================================================================

/// What can happen to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEvent {
    /// Payment gateway confirmed the payment.
    PaymentConfirmed,
    /// Fulfillment backend moved the order one step forward.
    Advance,
    /// Fulfillment found insufficient stock.
    StockExhausted,
    /// Customer asked to cancel. The mandatory reason travels with the
    /// ledger call, not with the event - the transition itself is pure.
    Cancel,
}

impl OrderEvent {
    /// Stable name used in error messages and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            OrderEvent::PaymentConfirmed => "payment_confirmed",
            OrderEvent::Advance => "advance",
            OrderEvent::StockExhausted => "stock_exhausted",
            OrderEvent::Cancel => "cancel",
        }
    }
}

// =============================================================================
// Transition Function
// =============================================================================

/// Pure transition function over the table above.
///
/// Any pair not in the table is rejected with
/// [`LifecycleError::IllegalTransition`] and the caller's status is left
/// unchanged - transitions are never partially applied.
///
/// ## Example
/// ```rust
/// use vela_core::lifecycle::{transition, OrderEvent};
/// use vela_core::types::OrderStatus;
///
/// let next = transition(OrderStatus::AwaitingPayment, OrderEvent::Cancel).unwrap();
/// assert_eq!(next, OrderStatus::Cancelled);
///
/// assert!(transition(OrderStatus::Completed, OrderEvent::Cancel).is_err());
/// ```
pub fn transition(from: OrderStatus, event: OrderEvent) -> Result<OrderStatus, LifecycleError> {
    use OrderEvent::*;
    use OrderStatus::*;

    let next = match (from, event) {
        (AwaitingPayment, PaymentConfirmed) => PendingProcessing,
        (AwaitingPayment, Cancel) => Cancelled,

        (PendingProcessing, Advance) => Confirmed,
        (PendingProcessing, Cancel) => Cancelled,
        (PendingProcessing, StockExhausted) => OutOfStock,

        (Confirmed, Advance) => Preparing,
        (Preparing, Advance) => Shipping,
        (Shipping, Advance) => Delivered,
        (Delivered, Advance) => Completed,

        (OutOfStock, Cancel) => Cancelled,

        (from, event) => {
            return Err(LifecycleError::IllegalTransition {
                from,
                event: event.name().to_string(),
            })
        }
    };

    Ok(next)
}

/// Whether the customer may initiate cancellation from this status.
///
/// Convenience over the table: exactly the statuses from which `Cancel`
/// transitions to `Cancelled`.
pub fn can_cancel(status: OrderStatus) -> bool {
    transition(status, OrderEvent::Cancel).is_ok()
}

// =============================================================================
// Status Metadata (UI lookup, decoupled from transitions)
// =============================================================================

/// UI-facing metadata for one status.
///
/// Kept in a lookup separate from the transition function on purpose:
/// rendering concerns must never leak into lifecycle decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMeta {
    /// Short label for badges and list rows.
    pub label: &'static str,
    /// Icon identifier understood by the frontend.
    pub icon: &'static str,
    /// One-line description for detail views.
    pub description: &'static str,
}

impl OrderStatus {
    /// Looks up the UI metadata for this status.
    pub const fn meta(&self) -> StatusMeta {
        match self {
            OrderStatus::AwaitingPayment => StatusMeta {
                label: "Awaiting payment",
                icon: "credit-card",
                description: "Waiting for the payment gateway to confirm",
            },
            OrderStatus::PendingProcessing => StatusMeta {
                label: "Pending",
                icon: "clock",
                description: "Paid, waiting for fulfillment to pick up",
            },
            OrderStatus::Confirmed => StatusMeta {
                label: "Confirmed",
                icon: "check-circle",
                description: "Fulfillment confirmed the order",
            },
            OrderStatus::Preparing => StatusMeta {
                label: "Preparing",
                icon: "package",
                description: "Items are being picked and packed",
            },
            OrderStatus::Shipping => StatusMeta {
                label: "Shipping",
                icon: "truck",
                description: "Handed to the carrier",
            },
            OrderStatus::Delivered => StatusMeta {
                label: "Delivered",
                icon: "home",
                description: "Carrier reported delivery",
            },
            OrderStatus::Completed => StatusMeta {
                label: "Completed",
                icon: "flag",
                description: "Order finished",
            },
            OrderStatus::OutOfStock => StatusMeta {
                label: "Out of stock",
                icon: "alert-triangle",
                description: "Insufficient stock; you may cancel for a refund",
            },
            OrderStatus::Cancelled => StatusMeta {
                label: "Cancelled",
                icon: "x-circle",
                description: "Order was cancelled",
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [OrderStatus; 9] = [
        OrderStatus::AwaitingPayment,
        OrderStatus::PendingProcessing,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::OutOfStock,
        OrderStatus::Cancelled,
    ];

    const ALL_EVENTS: [OrderEvent; 4] = [
        OrderEvent::PaymentConfirmed,
        OrderEvent::Advance,
        OrderEvent::StockExhausted,
        OrderEvent::Cancel,
    ];

    #[test]
    fn test_happy_path_forward_progression() {
        let mut status = OrderStatus::AwaitingPayment;
        status = transition(status, OrderEvent::PaymentConfirmed).unwrap();
        assert_eq!(status, OrderStatus::PendingProcessing);

        for expected in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Shipping,
            OrderStatus::Delivered,
            OrderStatus::Completed,
        ] {
            status = transition(status, OrderEvent::Advance).unwrap();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_cancellation_capable_statuses() {
        assert!(can_cancel(OrderStatus::AwaitingPayment));
        assert!(can_cancel(OrderStatus::PendingProcessing));
        assert!(can_cancel(OrderStatus::OutOfStock));

        assert!(!can_cancel(OrderStatus::Confirmed));
        assert!(!can_cancel(OrderStatus::Preparing));
        assert!(!can_cancel(OrderStatus::Shipping));
        assert!(!can_cancel(OrderStatus::Delivered));
        assert!(!can_cancel(OrderStatus::Completed));
        assert!(!can_cancel(OrderStatus::Cancelled));
    }

    #[test]
    fn test_out_of_stock_only_from_pending() {
        assert_eq!(
            transition(OrderStatus::PendingProcessing, OrderEvent::StockExhausted).unwrap(),
            OrderStatus::OutOfStock
        );
        for status in ALL_STATUSES {
            if status != OrderStatus::PendingProcessing {
                assert!(transition(status, OrderEvent::StockExhausted).is_err());
            }
        }
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for event in ALL_EVENTS {
            assert!(transition(OrderStatus::Completed, event).is_err());
            assert!(transition(OrderStatus::Cancelled, event).is_err());
        }
    }

    #[test]
    fn test_exactly_the_listed_transitions_are_legal() {
        let mut legal = 0;
        for status in ALL_STATUSES {
            for event in ALL_EVENTS {
                if transition(status, event).is_ok() {
                    legal += 1;
                }
            }
        }
        // 2 from AwaitingPayment, 3 from PendingProcessing, 4 Advance steps
        // beyond Confirmed..Delivered, 1 from OutOfStock.
        assert_eq!(legal, 10);
    }

    #[test]
    fn test_illegal_transition_carries_context() {
        let err = transition(OrderStatus::Completed, OrderEvent::Cancel).unwrap_err();
        let LifecycleError::IllegalTransition { from, event } = err;
        assert_eq!(from, OrderStatus::Completed);
        assert_eq!(event, "cancel");
    }

    #[test]
    fn test_meta_lookup_stays_in_sync() {
        for status in ALL_STATUSES {
            assert!(!status.meta().label.is_empty());
            assert!(!status.meta().description.is_empty());
        }
    }
}
