//! # Domain Types
//!
//! Core domain types used throughout Brew POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRule   │   │ AddonSelection  │   │  DiscountScope  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  espresso_shots │   │  AllProducts    │       │
//! │  │  kind           │   │  sea_salt_cream │   │  SpecificProd.  │       │
//! │  │  min_spend      │   │  syrup_sauces   │   │  SpecificCat.   │       │
//! │  │  scope          │   └─────────────────┘   │  Unrecognized   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   OrderType     │   │ PaymentMethod   │                             │
//! │  │  DineIn/TakeOut │   │  Cash/Gcash     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names (serde renames) match the JSON the sales and discount services
//! already speak, so no translation layer sits between these types and the
//! backend payloads.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{DiscountRate, Money};

// =============================================================================
// Drink Categories
// =============================================================================

/// Product categories whose line items may carry add-ons.
///
/// Fixed menu taxonomy: only drinks take espresso shots, sea salt cream,
/// or syrups/sauces.
pub const DRINK_CATEGORIES: &[&str] = &[
    "Barista Choice",
    "Specialty Coffee",
    "Premium Coffee",
    "Non-Coffee",
    "Frappe",
    "Sparkling Series",
    "Milktea",
];

/// Checks whether a category is a drink category (add-on eligible).
pub fn is_drink_category(category: &str) -> bool {
    DRINK_CATEGORIES.contains(&category)
}

// =============================================================================
// Add-ons
// =============================================================================

/// The selectable add-on kinds for drink items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum AddonKind {
    EspressoShots,
    SeaSaltCream,
    SyrupSauces,
}

impl AddonKind {
    /// All add-on kinds, in display order.
    pub const ALL: [AddonKind; 3] = [
        AddonKind::EspressoShots,
        AddonKind::SeaSaltCream,
        AddonKind::SyrupSauces,
    ];
}

/// Per-line add-on counts.
///
/// ## Add-on Signature
/// Structural equality of this struct is the add-on signature: two cart
/// lines with the same product name and equal `AddonSelection` values are
/// the same line and must be merged, never kept as duplicate rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct AddonSelection {
    pub espresso_shots: u32,
    pub sea_salt_cream: u32,
    pub syrup_sauces: u32,
}

impl AddonSelection {
    /// A selection with no add-ons (the signature of a plain item).
    pub const fn none() -> Self {
        AddonSelection {
            espresso_shots: 0,
            sea_salt_cream: 0,
            syrup_sauces: 0,
        }
    }

    /// True when no add-ons are selected.
    pub const fn is_empty(&self) -> bool {
        self.espresso_shots == 0 && self.sea_salt_cream == 0 && self.syrup_sauces == 0
    }

    /// Returns the count for one add-on kind.
    pub const fn count(&self, kind: AddonKind) -> u32 {
        match kind {
            AddonKind::EspressoShots => self.espresso_shots,
            AddonKind::SeaSaltCream => self.sea_salt_cream,
            AddonKind::SyrupSauces => self.syrup_sauces,
        }
    }

    /// Sets the count for one add-on kind.
    pub fn set(&mut self, kind: AddonKind, count: u32) {
        match kind {
            AddonKind::EspressoShots => self.espresso_shots = count,
            AddonKind::SeaSaltCream => self.sea_salt_cream = count,
            AddonKind::SyrupSauces => self.syrup_sauces = count,
        }
    }

    /// Iterates (kind, count) pairs, including zero counts.
    pub fn entries(&self) -> impl Iterator<Item = (AddonKind, u32)> + '_ {
        AddonKind::ALL.into_iter().map(|kind| (kind, self.count(kind)))
    }
}

// =============================================================================
// Order Type & Payment Method
// =============================================================================

/// Where the order is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderType {
    /// Consumed on premises.
    #[serde(rename = "Dine in")]
    DineIn,
    /// Packed to go.
    #[serde(rename = "Take out")]
    TakeOut,
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::DineIn
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash payment.
    #[serde(rename = "Cash")]
    Cash,
    /// GCash e-wallet; requires a reference number captured before submit.
    #[serde(rename = "GCash")]
    Gcash,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Discount Rules
// =============================================================================

/// The magnitude of a discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum DiscountKind {
    /// Percentage of the cart subtotal, in [0%, 100%).
    Percentage(DiscountRate),
    /// Flat amount off the cart subtotal.
    FixedAmount(Money),
}

/// The targeting rule of a discount.
///
/// `Unrecognized` carries the raw tag from the catalog service. It is kept
/// in the snapshot (the rule stays visible) but never matches any cart:
/// an unrecognized scope must not silently discount an order. Contrast with
/// add-on pricing, which fails open to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "type", content = "targets")]
pub enum DiscountScope {
    /// Eligible for any cart contents.
    AllProducts,
    /// Eligible when at least one cart line's product name is in the list.
    SpecificProducts(Vec<String>),
    /// Eligible when at least one cart line's category is in the list.
    SpecificCategories(Vec<String>),
    /// A scope tag this build does not understand. Never applicable.
    Unrecognized(String),
}

/// One discount rule from the catalog service.
///
/// Rules are created and edited exclusively by the discount administration
/// system; the engine consumes an immutable snapshot fetched per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    /// Stable identifier, unique within the catalog.
    pub id: String,

    /// Display label shown to the cashier and sent with the sale payload.
    pub name: String,

    /// Percentage or fixed amount, with magnitude.
    pub kind: DiscountKind,

    /// Minimum subtotal required for eligibility (zero = no minimum).
    pub min_spend: Money,

    /// Targeting rule.
    pub scope: DiscountScope,
}

// =============================================================================
// Discount Catalog
// =============================================================================

/// Read-only snapshot of the active discount rules.
///
/// Refreshed once per cart session; the engine never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountCatalog {
    rules: Vec<DiscountRule>,
}

impl DiscountCatalog {
    /// Builds a snapshot from already-normalized rules.
    pub fn new(rules: Vec<DiscountRule>) -> Self {
        DiscountCatalog { rules }
    }

    /// An empty snapshot (cart opened before the fetch completed).
    pub fn empty() -> Self {
        DiscountCatalog { rules: Vec::new() }
    }

    /// Looks up a rule by id.
    pub fn rule(&self, id: &str) -> Option<&DiscountRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// All rules in catalog order.
    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drink_categories() {
        assert!(is_drink_category("Specialty Coffee"));
        assert!(is_drink_category("Milktea"));
        assert!(!is_drink_category("Pastry"));
    }

    #[test]
    fn test_addon_signature_equality() {
        let a = AddonSelection {
            espresso_shots: 1,
            ..AddonSelection::none()
        };
        let b = AddonSelection {
            espresso_shots: 1,
            ..AddonSelection::none()
        };
        assert_eq!(a, b);

        let c = AddonSelection {
            syrup_sauces: 1,
            ..AddonSelection::none()
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_addon_set_and_count() {
        let mut addons = AddonSelection::none();
        assert!(addons.is_empty());

        addons.set(AddonKind::SeaSaltCream, 2);
        assert_eq!(addons.count(AddonKind::SeaSaltCream), 2);
        assert!(!addons.is_empty());

        let total: u32 = addons.entries().map(|(_, n)| n).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::DineIn).unwrap(),
            "\"Dine in\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Gcash).unwrap(),
            "\"GCash\""
        );
        let addons = AddonSelection {
            espresso_shots: 1,
            sea_salt_cream: 0,
            syrup_sauces: 2,
        };
        let json = serde_json::to_value(addons).unwrap();
        assert_eq!(json["espressoShots"], 1);
        assert_eq!(json["syrupSauces"], 2);
    }

    #[test]
    fn test_catalog_lookup() {
        let rule = DiscountRule {
            id: "7".to_string(),
            name: "Opening Promo".to_string(),
            kind: DiscountKind::Percentage(DiscountRate::from_bps(1000)),
            min_spend: Money::from_cents(20000),
            scope: DiscountScope::AllProducts,
        };
        let catalog = DiscountCatalog::new(vec![rule]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.rule("7").is_some());
        assert!(catalog.rule("8").is_none());
    }
}
