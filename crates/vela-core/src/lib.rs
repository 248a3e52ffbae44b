//! # vela-core: Pure Business Logic for Vela Retail
//!
//! This crate is the **heart** of the Vela order engine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vela Retail Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront / POS Frontend                       │   │
//! │  │    Product page ──► Register tabs ──► Checkout ──► My orders    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vela-register (Engine)                       │   │
//! │  │    add_item, set_quantity, cancel_order, recompute_shipping     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vela-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │  pricing  │  │ lifecycle │  │ promotion │   │   │
//! │  │   │   Order   │  │  resolver │  │  states   │  │   rules   │   │   │
//! │  │   │  Variant  │  │  windows  │  │  events   │  │   caps    │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  vela-ledger (Remote Services)                  │   │
//! │  │        Order ledger, address resolver, carrier quoter           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, OrderLineItem, Promotion, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Time-windowed variant discount resolution
//! - [`promotion`] - Order-level promotion code evaluation
//! - [`lifecycle`] - Order status state machine
//! - [`validation`] - Input validation (quantities, cancellation reasons)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vela_core::money::Money;
//! use vela_core::types::DiscountKind;
//!
//! // A 20% discount on 200,000 (minor units)
//! let price = Money::from_minor(200_000);
//! let reduced = DiscountKind::Percentage.apply(20, price);
//! assert_eq!(reduced.minor(), 160_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lifecycle;
pub mod money;
pub mod pricing;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vela_core::Money` instead of
// `use vela_core::money::Money`

pub use error::{CoreError, LifecycleError, PromotionError, ValidationError};
pub use lifecycle::{can_cancel, transition, OrderEvent, StatusMeta};
pub use money::Money;
pub use pricing::{resolve_price, PriceLabel, ResolvedPrice};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-tenant in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum length of a customer cancellation reason.
pub const MAX_CANCEL_REASON_LEN: usize = 500;

/// Maximum length of a promotion code.
pub const MAX_PROMOTION_CODE_LEN: usize = 32;
