//! # brew-core: Pure Business Logic for Brew POS
//!
//! This crate is the **heart** of Brew POS. It contains all cart pricing and
//! discount logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Cashier Frontend                            │   │
//! │  │    Menu UI ──► Cart Panel ──► Discounts Modal ──► Summary       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     brew-terminal                               │   │
//! │  │    CartSession, catalog adapter, sales client, auth token       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │  pricing  │  │ discount  │  │   money   │  │   │
//! │  │   │  LineItem │  │  subtotal │  │ evaluator │  │   Money   │  │   │
//! │  │   │   Cart    │  │  add-ons  │  │ selection │  │   rates   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (DiscountRule, AddonSelection, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The Cart Store (line items, merge-by-signature)
//! - [`pricing`] - Subtotal and add-on pricing
//! - [`discount`] - Applicability evaluation and the selection workflow
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Failure**: Rejections are returned, and index contracts are documented
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::cart::{Cart, LineItem};
//! use brew_core::money::Money;
//! use brew_core::pricing::{subtotal, AddonPriceTable};
//! use brew_core::types::AddonKind;
//!
//! let mut prices = AddonPriceTable::default();
//! prices.set(AddonKind::EspressoShots, Money::from_cents(1500));
//!
//! let mut cart = Cart::new();
//! let mut latte = LineItem::new("Latte", "Specialty Coffee", Money::from_cents(12000), 2);
//! latte.addons.set(AddonKind::EspressoShots, 1);
//! cart.add_or_merge(latte).unwrap();
//!
//! // (₱120.00 + ₱15.00) × 2 = ₱270.00
//! assert_eq!(subtotal(&cart, &prices).cents(), 27000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use brew_core::Money` instead of
// `use brew_core::money::Money`

pub use cart::{Cart, LineItem};
pub use discount::{discount_amount, is_applicable, total, DiscountSelection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use pricing::{subtotal, AddonPriceTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single row in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
