//! # Discount Engine
//!
//! Applicability evaluation and the staged/applied selection workflow.
//!
//! ## Selection Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Two-Phase Discount Selection                               │
//! │                                                                         │
//! │            open(): staged = applied (snapshot)                          │
//! │     ┌──────────────────────────────────────────────┐                    │
//! │     │                                              ▼                    │
//! │  ┌──┴───┐                                      ┌──────┐                 │
//! │  │ Idle │                                      │ Open │◄──┐             │
//! │  └──────┘                                      └──┬───┘   │ toggle(id)  │
//! │     ▲                                             │───────┘ (gated on   │
//! │     │  commit(): applied = staged                 │          rule being │
//! │     ├─────────────────────────────────────────────┤          applicable)│
//! │     │  cancel(): staged discarded                 │                     │
//! │     └─────────────────────────────────────────────┘                     │
//! │                                                                         │
//! │  `applied` is authoritative for the live transaction while Idle.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why No Caching
//! Applicability is re-evaluated on every call. Cart contents change
//! frequently while the selection workflow is open; a cached eligibility
//! flag goes stale the moment a row is added or removed. The predicate is a
//! linear scan over the cart and cheap enough to recompute.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::money::Money;
use crate::pricing::{subtotal, AddonPriceTable};
use crate::types::{DiscountCatalog, DiscountKind, DiscountRule, DiscountScope};

// =============================================================================
// Applicability Evaluator
// =============================================================================

/// Decides whether a rule is currently eligible for this cart.
///
/// The minimum-spend check always dominates: a cart below `min_spend` is
/// ineligible regardless of scope. Unrecognized scopes are never eligible
/// (fail-closed; contrast the fail-open add-on price lookup).
///
/// Pure and side-effect-free; `cart_subtotal` is passed in so a caller
/// evaluating many rules computes the subtotal once.
pub fn is_applicable(rule: &DiscountRule, cart: &Cart, cart_subtotal: Money) -> bool {
    if cart_subtotal < rule.min_spend {
        return false;
    }

    match &rule.scope {
        DiscountScope::AllProducts => true,
        DiscountScope::SpecificProducts(products) => cart
            .items()
            .iter()
            .any(|item| products.iter().any(|p| p == &item.name)),
        DiscountScope::SpecificCategories(categories) => cart
            .items()
            .iter()
            .any(|item| categories.iter().any(|c| c == &item.category)),
        DiscountScope::Unrecognized(_) => false,
    }
}

// =============================================================================
// Discount Amount
// =============================================================================

/// Result of a discount-amount computation.
///
/// `skipped` lists ids that were excluded: either missing from the catalog
/// (drift between staging and now) or no longer applicable to the current
/// cart. Exclusion never blocks checkout; callers may surface the ids as a
/// diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountBreakdown {
    pub amount: Money,
    pub skipped: Vec<String>,
}

/// Computes the combined discount for a set of rule ids, with diagnostics.
///
/// Percentage rules contribute `subtotal × rate`; fixed rules contribute
/// their amount. The sum is clamped to `[0, subtotal]`: stacked discounts
/// must never drive the payable total negative.
pub fn discount_amount_detailed<'a, I>(
    ids: I,
    catalog: &DiscountCatalog,
    cart: &Cart,
    prices: &AddonPriceTable,
) -> DiscountBreakdown
where
    I: IntoIterator<Item = &'a String>,
{
    let cart_subtotal = subtotal(cart, prices);
    let mut amount = Money::zero();
    let mut skipped = Vec::new();

    for id in ids {
        let rule = match catalog.rule(id) {
            Some(rule) if is_applicable(rule, cart, cart_subtotal) => rule,
            _ => {
                skipped.push(id.clone());
                continue;
            }
        };

        amount += match rule.kind {
            DiscountKind::Percentage(rate) => cart_subtotal.percentage_of(rate),
            DiscountKind::FixedAmount(value) => value,
        };
    }

    DiscountBreakdown {
        amount: amount.clamp_non_negative().min(cart_subtotal),
        skipped,
    }
}

/// Combined discount for a set of rule ids, clamped to `[0, subtotal]`.
pub fn discount_amount<'a, I>(
    ids: I,
    catalog: &DiscountCatalog,
    cart: &Cart,
    prices: &AddonPriceTable,
) -> Money
where
    I: IntoIterator<Item = &'a String>,
{
    discount_amount_detailed(ids, catalog, cart, prices).amount
}

// =============================================================================
// Selection Workflow
// =============================================================================

/// The selection workflow's phase.
///
/// `staged` is only meaningful while the workflow is open; modeling it
/// inside the `Open` variant makes the Idle phase unable to carry a stale
/// staged set by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "phase")]
enum SelectionPhase {
    Idle,
    Open { staged: BTreeSet<String> },
}

/// Staged/applied discount selection for the active transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSelection {
    applied: BTreeSet<String>,
    phase: SelectionPhase,
}

impl Default for DiscountSelection {
    fn default() -> Self {
        DiscountSelection::new()
    }
}

impl DiscountSelection {
    /// A fresh selection: nothing applied, workflow idle.
    pub fn new() -> Self {
        DiscountSelection {
            applied: BTreeSet::new(),
            phase: SelectionPhase::Idle,
        }
    }

    /// Whether the selection workflow is open.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, SelectionPhase::Open { .. })
    }

    /// Ids committed to the active transaction.
    pub fn applied(&self) -> &BTreeSet<String> {
        &self.applied
    }

    /// The staged set, when the workflow is open.
    pub fn staged(&self) -> Option<&BTreeSet<String>> {
        match &self.phase {
            SelectionPhase::Open { staged } => Some(staged),
            SelectionPhase::Idle => None,
        }
    }

    /// Opens the workflow, snapshotting `applied` into `staged`.
    ///
    /// Opening an already-open workflow re-snapshots (the UI reopened the
    /// dialog; any staged-but-uncommitted edits are discarded).
    pub fn open(&mut self) {
        self.phase = SelectionPhase::Open {
            staged: self.applied.clone(),
        };
    }

    /// Flips membership of `id` in the staged set.
    ///
    /// A no-op when the workflow is idle, when the id has no rule in the
    /// catalog, or when the rule is not currently applicable. This is the
    /// engine-level gate: an ineligible box can never be checked, whatever
    /// the UI shows. Returns whether the staged set changed.
    pub fn toggle(
        &mut self,
        id: &str,
        catalog: &DiscountCatalog,
        cart: &Cart,
        prices: &AddonPriceTable,
    ) -> bool {
        let staged = match &mut self.phase {
            SelectionPhase::Open { staged } => staged,
            SelectionPhase::Idle => return false,
        };

        let eligible = catalog
            .rule(id)
            .is_some_and(|rule| is_applicable(rule, cart, subtotal(cart, prices)));
        if !eligible {
            return false;
        }

        if !staged.remove(id) {
            staged.insert(id.to_string());
        }
        true
    }

    /// Commits the staged set as applied and closes the workflow.
    pub fn commit(&mut self) {
        if let SelectionPhase::Open { staged } = std::mem::replace(&mut self.phase, SelectionPhase::Idle) {
            self.applied = staged;
        }
    }

    /// Closes the workflow, discarding the staged set.
    pub fn cancel(&mut self) {
        self.phase = SelectionPhase::Idle;
    }

    /// Drops every selection and returns to idle (session reset).
    pub fn clear(&mut self) {
        self.applied.clear();
        self.phase = SelectionPhase::Idle;
    }

    /// Discount amount for the applied set.
    pub fn applied_amount(
        &self,
        catalog: &DiscountCatalog,
        cart: &Cart,
        prices: &AddonPriceTable,
    ) -> Money {
        discount_amount(&self.applied, catalog, cart, prices)
    }

    /// Applied amount plus the excluded-id diagnostics.
    pub fn applied_breakdown(
        &self,
        catalog: &DiscountCatalog,
        cart: &Cart,
        prices: &AddonPriceTable,
    ) -> DiscountBreakdown {
        discount_amount_detailed(&self.applied, catalog, cart, prices)
    }

    /// Discount amount for the staged set (zero while idle).
    pub fn staged_amount(
        &self,
        catalog: &DiscountCatalog,
        cart: &Cart,
        prices: &AddonPriceTable,
    ) -> Money {
        match self.staged() {
            Some(staged) => discount_amount(staged, catalog, cart, prices),
            None => Money::zero(),
        }
    }
}

// =============================================================================
// Total
// =============================================================================

/// Payable total: `max(0, subtotal − applied discount)`.
///
/// The clamp inside `discount_amount` already keeps the difference
/// non-negative; the outer clamp is a second, independent layer so the
/// total stays non-negative even if the inner rule set changes someday.
pub fn total(
    cart: &Cart,
    selection: &DiscountSelection,
    catalog: &DiscountCatalog,
    prices: &AddonPriceTable,
) -> Money {
    let cart_subtotal = subtotal(cart, prices);
    let discount = selection.applied_amount(catalog, cart, prices);
    cart_subtotal.saturating_sub_to_zero(discount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::money::DiscountRate;
    use crate::types::AddonKind;

    fn prices() -> AddonPriceTable {
        let mut table = AddonPriceTable::default();
        table.set(AddonKind::EspressoShots, Money::from_cents(1500));
        table
    }

    /// Worked cart: 2× Latte ₱120.00 with one ₱15.00 espresso
    /// shot each → subtotal ₱270.00.
    fn latte_cart() -> Cart {
        let mut cart = Cart::new();
        let mut item = LineItem::new(
            "Latte",
            "Specialty Coffee",
            Money::from_cents(12000),
            2,
        );
        item.addons.set(AddonKind::EspressoShots, 1);
        cart.add_or_merge(item).unwrap();
        cart
    }

    fn percent_rule(id: &str, bps: u32, min_spend_cents: i64) -> DiscountRule {
        DiscountRule {
            id: id.to_string(),
            name: format!("Promo {}", id),
            kind: DiscountKind::Percentage(DiscountRate::from_bps(bps)),
            min_spend: Money::from_cents(min_spend_cents),
            scope: DiscountScope::AllProducts,
        }
    }

    fn fixed_rule(id: &str, cents: i64) -> DiscountRule {
        DiscountRule {
            id: id.to_string(),
            name: format!("Promo {}", id),
            kind: DiscountKind::FixedAmount(Money::from_cents(cents)),
            min_spend: Money::zero(),
            scope: DiscountScope::AllProducts,
        }
    }

    #[test]
    fn test_min_spend_dominates_all_scopes() {
        let cart = latte_cart();
        let sub = subtotal(&cart, &prices());

        // min spend above ₱270.00: never applicable, even for AllProducts
        let mut rule = percent_rule("1", 1000, 30000);
        assert!(!is_applicable(&rule, &cart, sub));

        rule.scope = DiscountScope::SpecificProducts(vec!["Latte".into()]);
        assert!(!is_applicable(&rule, &cart, sub));

        rule.scope = DiscountScope::SpecificCategories(vec!["Specialty Coffee".into()]);
        assert!(!is_applicable(&rule, &cart, sub));
    }

    #[test]
    fn test_all_products_scope() {
        let cart = latte_cart();
        let rule = percent_rule("1", 1000, 20000);
        // ₱270.00 ≥ ₱200.00 min spend
        assert!(is_applicable(&rule, &cart, subtotal(&cart, &prices())));
    }

    #[test]
    fn test_specific_products_scope() {
        let cart = latte_cart();
        let sub = subtotal(&cart, &prices());

        let mut rule = percent_rule("1", 1000, 0);
        rule.scope = DiscountScope::SpecificProducts(vec!["Latte".into()]);
        assert!(is_applicable(&rule, &cart, sub));

        rule.scope = DiscountScope::SpecificProducts(vec!["Americano".into()]);
        assert!(!is_applicable(&rule, &cart, sub));
    }

    #[test]
    fn test_specific_categories_scope() {
        let cart = latte_cart();
        let sub = subtotal(&cart, &prices());

        let mut rule = percent_rule("1", 1000, 0);
        rule.scope = DiscountScope::SpecificCategories(vec!["Specialty Coffee".into()]);
        assert!(is_applicable(&rule, &cart, sub));

        // Milktea scope never matches a latte cart
        rule.scope = DiscountScope::SpecificCategories(vec!["Milktea".into()]);
        assert!(!is_applicable(&rule, &cart, sub));
    }

    #[test]
    fn test_unrecognized_scope_fails_closed() {
        let cart = latte_cart();
        let mut rule = percent_rule("1", 1000, 0);
        rule.scope = DiscountScope::Unrecognized("bundle_pricing".into());
        assert!(!is_applicable(&rule, &cart, subtotal(&cart, &prices())));
    }

    #[test]
    fn test_percentage_amount_worked_cart() {
        // 10% over ₱200.00 min spend against the ₱270.00 cart → ₱27.00
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 20000)]);
        let ids = vec!["1".to_string()];

        assert_eq!(
            discount_amount(&ids, &catalog, &cart, &prices()).cents(),
            2700
        );
    }

    #[test]
    fn test_stacked_fixed_rules_clamp_to_subtotal() {
        // ₱150.00 + ₱200.00 against ₱270.00 clamps to ₱270.00
        let cart = latte_cart();
        let catalog =
            DiscountCatalog::new(vec![fixed_rule("1", 15000), fixed_rule("2", 20000)]);
        let ids = vec!["1".to_string(), "2".to_string()];

        let amount = discount_amount(&ids, &catalog, &cart, &prices());
        assert_eq!(amount.cents(), 27000);

        let mut selection = DiscountSelection::new();
        selection.open();
        selection.toggle("1", &catalog, &cart, &prices());
        selection.toggle("2", &catalog, &cart, &prices());
        selection.commit();

        // Total never goes negative
        assert!(total(&cart, &selection, &catalog, &prices()).is_zero());
    }

    #[test]
    fn test_dangling_id_skipped_and_reported() {
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![fixed_rule("1", 1000)]);
        let ids = vec!["1".to_string(), "ghost".to_string()];

        let breakdown = discount_amount_detailed(&ids, &catalog, &cart, &prices());
        assert_eq!(breakdown.amount.cents(), 1000);
        assert_eq!(breakdown.skipped, vec!["ghost".to_string()]);
    }

    #[test]
    fn test_toggle_stages_and_unstages() {
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 0)]);
        let mut selection = DiscountSelection::new();

        selection.open();
        assert!(selection.toggle("1", &catalog, &cart, &prices()));
        assert!(selection.staged().unwrap().contains("1"));

        assert!(selection.toggle("1", &catalog, &cart, &prices()));
        assert!(selection.staged().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_ineligible_is_noop() {
        let cart = latte_cart();
        // min spend ₱300.00 is above the ₱270.00 subtotal
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 30000)]);
        let mut selection = DiscountSelection::new();

        selection.open();
        assert!(!selection.toggle("1", &catalog, &cart, &prices()));
        assert!(!selection.toggle("unknown", &catalog, &cart, &prices()));
        assert!(selection.staged().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_while_idle_is_noop() {
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 0)]);
        let mut selection = DiscountSelection::new();

        assert!(!selection.toggle("1", &catalog, &cart, &prices()));
        assert!(selection.applied().is_empty());
    }

    #[test]
    fn test_commit_copies_staged_to_applied() {
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 0)]);
        let mut selection = DiscountSelection::new();

        selection.open();
        selection.toggle("1", &catalog, &cart, &prices());
        selection.commit();

        assert!(!selection.is_open());
        assert!(selection.applied().contains("1"));
    }

    #[test]
    fn test_cancel_never_mutates_applied() {
        let cart = latte_cart();
        let catalog =
            DiscountCatalog::new(vec![percent_rule("1", 1000, 0), percent_rule("2", 500, 0)]);
        let mut selection = DiscountSelection::new();

        selection.open();
        selection.toggle("1", &catalog, &cart, &prices());
        selection.commit();

        selection.open();
        selection.toggle("2", &catalog, &cart, &prices());
        selection.toggle("1", &catalog, &cart, &prices());
        selection.cancel();

        assert_eq!(selection.applied().len(), 1);
        assert!(selection.applied().contains("1"));
    }

    #[test]
    fn test_reopen_snapshots_applied() {
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 0)]);
        let mut selection = DiscountSelection::new();

        selection.open();
        selection.toggle("1", &catalog, &cart, &prices());
        selection.commit();

        selection.open();
        assert_eq!(selection.staged().unwrap(), selection.applied());
    }

    #[test]
    fn test_stale_applied_id_excluded_but_kept() {
        // Stage a min-spend rule while eligible, then shrink the cart below
        // the threshold: the id stays applied but contributes nothing.
        let mut cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 20000)]);
        let mut selection = DiscountSelection::new();

        selection.open();
        selection.toggle("1", &catalog, &cart, &prices());
        selection.commit();
        assert_eq!(
            selection.applied_amount(&catalog, &cart, &prices()).cents(),
            2700
        );

        cart.update_quantity(0, -1); // subtotal drops to ₱135.00

        assert!(selection.applied().contains("1"));
        assert!(selection
            .applied_amount(&catalog, &cart, &prices())
            .is_zero());
        let breakdown = selection.applied_breakdown(&catalog, &cart, &prices());
        assert_eq!(breakdown.skipped, vec!["1".to_string()]);
    }

    #[test]
    fn test_total_worked_cart() {
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 20000)]);
        let mut selection = DiscountSelection::new();

        selection.open();
        selection.toggle("1", &catalog, &cart, &prices());
        selection.commit();

        // ₱270.00 − ₱27.00 = ₱243.00
        assert_eq!(
            total(&cart, &selection, &catalog, &prices()).cents(),
            24300
        );
    }

    #[test]
    fn test_staged_amount_idle_is_zero() {
        let cart = latte_cart();
        let catalog = DiscountCatalog::new(vec![percent_rule("1", 1000, 0)]);
        let selection = DiscountSelection::new();
        assert!(selection.staged_amount(&catalog, &cart, &prices()).is_zero());
    }
}
