//! # vela-register: Draft-Cart Engine for Vela Retail
//!
//! The stateful engine between the storefront/POS frontend and the remote
//! order ledger.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vela Retail Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront / POS Frontend                       │   │
//! │  └──────┬──────────────┬──────────────┬──────────────┬────────────┘   │
//! │         │              │              │              │                 │
//! │  ┌──────▼─────┐ ┌──────▼─────┐ ┌──────▼─────┐ ┌──────▼─────┐         │
//! │  │  Register  │ │ Canceller  │ │  Shipping  │ │OrderSearch │         │
//! │  │  tabs,     │ │ reason +   │ │ Recalcula- │ │ debounced  │         │
//! │  │  items,    │ │ re-fetch   │ │ tor chain  │ │ listing    │         │
//! │  │  promos,   │ │            │ │            │ │            │         │
//! │  │  checkout  │ │            │ │            │ │            │         │
//! │  └──────┬─────┘ └──────┬─────┘ └──────┬─────┘ └──────┬─────┘         │
//! │         └──────────────┴──────┬───────┴──────────────┘                 │
//! │                               │  vela-ledger traits                    │
//! │                        ┌──────▼─────────┐                              │
//! │                        │ remote ledger  │                              │
//! │                        └────────────────┘                              │
//! │                                                                         │
//! │  Shared discipline: validate locally first (zero network calls on       │
//! │  rejection), one submission in flight per tab/order, and after any      │
//! │  accepted mutation trust only the ledger's authoritative answer.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`register`] - Multi-tab session: items, promotions, checkout
//! - [`session`] - Tab state and the optimistic-edit snapshot machinery
//! - [`cancel`] - Customer cancellation with mandatory reason
//! - [`shipping`] - Address-change → fee-requote → atomic-persist chain
//! - [`search`] - Debounced order-history search
//! - [`debounce`] - The restartable quiet-period timer
//! - [`error`] - What the UI adapter sees when an operation fails

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cancel;
pub mod debounce;
pub mod error;
pub mod register;
pub mod search;
pub mod session;
pub mod shipping;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cancel::Canceller;
pub use debounce::Debouncer;
pub use error::{RegisterError, RegisterResult, ShippingStep};
pub use register::Register;
pub use search::{OrderSearch, SearchUpdate};
pub use session::{LineSnapshot, RegisterTab};
pub use shipping::ShippingRecalculator;
