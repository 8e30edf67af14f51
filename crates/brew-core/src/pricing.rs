//! # Pricing Calculator
//!
//! Derives per-line totals and the cart subtotal from the Cart Store plus
//! the configured add-on price table.
//!
//! ## Price Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Prices Come From                             │
//! │                                                                         │
//! │  LineItem.unit_price ──┐                                                │
//! │                        ├──► line_total() ──► subtotal() ──► discounts   │
//! │  AddonPriceTable ──────┘         │                │                     │
//! │  (config-supplied)               │                └──► total()          │
//! │                                  └──► displayed per row                 │
//! │                                                                         │
//! │  subtotal() is the SINGLE source of truth for the pre-discount total:   │
//! │  minimum-spend checks, discount caps and the payable total all read it. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, LineItem};
use crate::money::Money;
use crate::types::AddonKind;

// =============================================================================
// Add-on Price Table
// =============================================================================

/// Unit prices for the selectable add-ons.
///
/// Supplied by configuration external to the engine. Lookup of a kind with
/// no configured price yields zero: a missing price entry must never block
/// checkout. (Discount legality is the opposite policy; see the evaluator.)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonPriceTable {
    prices: HashMap<AddonKind, Money>,
}

impl AddonPriceTable {
    /// Builds a table from explicit per-kind prices.
    pub fn new(prices: HashMap<AddonKind, Money>) -> Self {
        AddonPriceTable { prices }
    }

    /// Sets the price for one add-on kind.
    pub fn set(&mut self, kind: AddonKind, price: Money) {
        self.prices.insert(kind, price);
    }

    /// Unit price for an add-on kind; zero when unconfigured (fail-open).
    pub fn unit_price(&self, kind: AddonKind) -> Money {
        self.prices.get(&kind).copied().unwrap_or(Money::zero())
    }
}

// =============================================================================
// Calculations
// =============================================================================

/// Sum of `count × unit price` over a line's add-on selection.
pub fn line_addon_total(item: &LineItem, prices: &AddonPriceTable) -> Money {
    item.addons
        .entries()
        .map(|(kind, count)| prices.unit_price(kind).multiply_quantity(count as i64))
        .sum()
}

/// Full price of one row: `(unit price + add-on total) × quantity`.
pub fn line_total(item: &LineItem, prices: &AddonPriceTable) -> Money {
    (item.unit_price + line_addon_total(item, prices)).multiply_quantity(item.quantity)
}

/// Pre-discount total of the whole cart.
pub fn subtotal(cart: &Cart, prices: &AddonPriceTable) -> Money {
    cart.items().iter().map(|i| line_total(i, prices)).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
