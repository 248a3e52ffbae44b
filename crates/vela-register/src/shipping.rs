//! # Shipping Recalculation
//!
//! Recomputes the carrier fee when the buyer changes the delivery address.
//!
//! ## Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   province + district          region + ward          zone + parcels    │
//! │  ───────────────────►  region ──────────────►  zone ─────────────►  fee │
//! │     ResolveRegion              ResolveZone              Quote           │
//! │                                                                         │
//! │                        address + fee  ──────────────►  order            │
//! │                                  Persist (one atomic update)            │
//! │                                                                         │
//! │  The chain is all-or-nothing: a failure at ANY step leaves the stored   │
//! │  address and fee exactly as they were, because nothing is persisted     │
//! │  before the final step. Errors carry the step that broke.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::debug;

use vela_core::{Address, Order};
use vela_ledger::{AddressResolver, CarrierQuoter, OrderLedger, Parcel};

use crate::error::{RegisterError, RegisterResult, ShippingStep};

/// Drives the address-change → fee-requote → atomic-persist chain.
pub struct ShippingRecalculator {
    resolver: Arc<dyn AddressResolver>,
    quoter: Arc<dyn CarrierQuoter>,
    ledger: Arc<dyn OrderLedger>,
}

impl ShippingRecalculator {
    pub fn new(
        resolver: Arc<dyn AddressResolver>,
        quoter: Arc<dyn CarrierQuoter>,
        ledger: Arc<dyn OrderLedger>,
    ) -> Self {
        ShippingRecalculator {
            resolver,
            quoter,
            ledger,
        }
    }

    /// Parcels for quotation, from the frozen per-line weights.
    fn parcels(order: &Order) -> Vec<Parcel> {
        order
            .items
            .iter()
            .map(|i| Parcel {
                weight_grams: i.weight_grams,
                quantity: i.quantity,
            })
            .collect()
    }

    /// Runs the full chain for a new address and returns the authoritative
    /// order with the new address, fee, and recomputed total.
    pub async fn recalculate(&self, order: &Order, address: Address) -> RegisterResult<Order> {
        let region = self
            .resolver
            .resolve_region(&address.province, &address.district)
            .await
            .map_err(|source| RegisterError::Shipping {
                step: ShippingStep::ResolveRegion,
                source,
            })?;

        let zone = self
            .resolver
            .resolve_zone(&region, &address.ward)
            .await
            .map_err(|source| RegisterError::Shipping {
                step: ShippingStep::ResolveZone,
                source,
            })?;

        let fee_minor = self
            .quoter
            .quote(&zone, &Self::parcels(order))
            .await
            .map_err(|source| RegisterError::Shipping {
                step: ShippingStep::Quote,
                source,
            })?;
        debug!(order_id = %order.id, zone = %zone.0, fee_minor, "carrier fee quoted");

        self.ledger
            .update_shipping(&order.id, address, fee_minor)
            .await
            .map_err(|source| RegisterError::Shipping {
                step: ShippingStep::Persist,
                source,
            })
    }
}
