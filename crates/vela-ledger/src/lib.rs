//! # vela-ledger: Remote Collaborators for the Vela Order Engine
//!
//! The order engine treats every service it talks to as an opaque
//! collaborator: an order ledger, an address resolution service, a carrier
//! quotation service, and a checkout finalization endpoint. This crate
//! defines those interfaces and ships two implementations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       vela-ledger (THIS CRATE)                          │
//! │                                                                         │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────────────────┐  │
//! │  │ api         │  │ http         │  │ memory                         │  │
//! │  │ (traits +   │  │ (reqwest     │  │ (authoritative in-memory       │  │
//! │  │  DTOs)      │  │  clients)    │  │  ledger used in tests)         │  │
//! │  │             │  │              │  │                                │  │
//! │  │ OrderLedger │  │ HttpLedger   │  │ Recomputes totals with the     │  │
//! │  │ AddressRes. │  │ HttpShipping │  │ same vela-core formulas the    │  │
//! │  │ CarrierQuo. │  │ Gateway      │  │ production ledger runs         │  │
//! │  └─────────────┘  └──────────────┘  └────────────────────────────────┘  │
//! │                                                                         │
//! │  The engine depends on OUTCOME semantics (success/failure, returned     │
//! │  authoritative order state), never on transport shape.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;

pub use api::{
    AddressResolver, CarrierQuoter, CheckoutOutcome, CheckoutRequest, CreateOrderRequest,
    OrderLedger, OrderListFilter, OrderPage, Parcel, RegionId, ZoneCode,
};
pub use config::GatewayConfig;
pub use error::{LedgerError, LedgerResult};
pub use http::{HttpLedger, HttpShippingGateway};
pub use memory::MemoryLedger;
