//! # Cart Store
//!
//! The ordered, in-memory sequence of line items for the active sale.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Cashier Action           Operation               Cart Change           │
//! │  ──────────────           ─────────               ───────────           │
//! │                                                                         │
//! │  Tap Product ────────────► add_or_merge() ──────► merge or push row    │
//! │                                                                         │
//! │  +/- Buttons ────────────► update_quantity() ───► qty += delta          │
//! │                                                    (≤ 0 removes row)    │
//! │                                                                         │
//! │  Trash Button ───────────► remove() ────────────► row removed          │
//! │                                                                         │
//! │  Save Add-ons ───────────► set_addons() ────────► replace + re-merge   │
//! │                                                                         │
//! │  Session Reset ──────────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  IDENTITY: a row is keyed by (product name, add-on signature).          │
//! │  At most one row may exist per key at any time.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{is_drink_category, AddonSelection};
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product entry in the cart.
///
/// ## Design Notes
/// - `unit_price` is frozen at add time; a later price change in the menu
///   does not reprice lines already in the cart.
/// - `addons` always has a value; "no add-ons" is the all-zero selection,
///   which keeps the signature comparison total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product name; cart-local identity together with the add-on signature.
    pub name: String,

    /// Product category; drives category-scoped discounts and add-on rules.
    pub category: String,

    /// Base unit price, frozen at add time.
    pub unit_price: Money,

    /// Quantity; always positive while the line is in the cart.
    pub quantity: i64,

    /// Add-on counts for this line.
    #[serde(default)]
    pub addons: AddonSelection,
}

impl LineItem {
    /// Creates a plain line (no add-ons) for a product.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        LineItem {
            name: name.into(),
            category: category.into(),
            unit_price,
            quantity,
            addons: AddonSelection::none(),
        }
    }

    /// Whether this line may carry add-ons (drink categories only).
    pub fn allows_addons(&self) -> bool {
        is_drink_category(&self.category)
    }

    /// True when `other` is the same row identity: same product name and
    /// structurally identical add-on selection.
    pub fn same_signature(&self, other: &LineItem) -> bool {
        self.name == other.name && self.addons == other.addons
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one row per (name, add-on signature) pair
/// - Quantity of every row is > 0
/// - Row order is insertion order (what the cashier sees)
/// - Maximum rows: [`MAX_CART_ITEMS`]; maximum quantity: [`MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a line item, or merges it into an existing row with the same
    /// (name, add-on signature), summing quantities.
    ///
    /// ## Errors
    /// - quantity not positive or above [`MAX_ITEM_QUANTITY`]
    /// - unit price negative
    /// - merged quantity would exceed [`MAX_ITEM_QUANTITY`]
    /// - cart already holds [`MAX_CART_ITEMS`] rows
    pub fn add_or_merge(&mut self, item: LineItem) -> CoreResult<()> {
        validate_quantity(item.quantity)?;

        if item.unit_price.is_negative() {
            return Err(ValidationError::Negative {
                field: "unitPrice".to_string(),
            }
            .into());
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.same_signature(&item)) {
            let new_qty = existing.quantity + item.quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Adds `delta` (may be negative) to a row's quantity; removes the row
    /// when the result is zero or below. The result is capped at
    /// [`MAX_ITEM_QUANTITY`], so repeated increments cannot push a row past
    /// the limit.
    ///
    /// ## Panics
    /// Panics if `index` is out of range. Callers index rows they are
    /// already displaying, so a bad index is a programming error, not a
    /// recoverable failure.
    pub fn update_quantity(&mut self, index: usize, delta: i64) {
        let item = &mut self.items[index];
        item.quantity = (item.quantity + delta).min(MAX_ITEM_QUANTITY);
        if item.quantity <= 0 {
            self.items.remove(index);
        }
    }

    /// Removes a row unconditionally.
    ///
    /// ## Panics
    /// Panics if `index` is out of range (programming error).
    pub fn remove(&mut self, index: usize) -> LineItem {
        self.items.remove(index)
    }

    /// Replaces a row's add-on selection.
    ///
    /// If the replacement makes this row a duplicate of another row (same
    /// name, same resulting signature), the two rows are merged: the other
    /// row absorbs this row's quantity, capped at [`MAX_ITEM_QUANTITY`],
    /// and this row is removed. The cart keeps at most one row per
    /// signature either way.
    ///
    /// ## Panics
    /// Panics if `index` is out of range (programming error).
    pub fn set_addons(&mut self, index: usize, addons: AddonSelection) {
        let name = self.items[index].name.clone();

        let duplicate = self
            .items
            .iter()
            .position(|i| i.name == name && i.addons == addons)
            .filter(|&pos| pos != index);

        match duplicate {
            Some(pos) => {
                let absorbed = self.items.remove(index);
                // Removing `index` may have shifted the duplicate's position.
                let pos = if pos > index { pos - 1 } else { pos };
                let row = &mut self.items[pos];
                row.quantity = (row.quantity + absorbed.quantity).min(MAX_ITEM_QUANTITY);
            }
            None => {
                self.items[index].addons = addons;
            }
        }
    }

    /// Empties the cart. Also invoked transitively when the owning session
    /// resets.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// All rows in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of rows in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity across all rows.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
