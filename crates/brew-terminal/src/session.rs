//! # Cart Session
//!
//! One cashier's active sale: the cart, the discount selection, order type
//! and payment method, plus the transaction assembly and submission flow.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartSession Lifecycle                              │
//! │                                                                         │
//! │  Cart view opens ──► CartSession::new() ──► load_catalog()             │
//! │                                              (async fetch, snapshot    │
//! │                                               read-only afterwards)    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  add_item / update_quantity / set_addons / discounts workflow          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  submit() ──► build_payload() ──► SalesSink                            │
//! │    │                                 │                                  │
//! │    │          SUCCESS ◄──────────────┤                                  │
//! │    │          cart, staged, applied all cleared; confirmation signaled  │
//! │    │                                 │                                  │
//! │    │          FAILURE ◄──────────────┘                                  │
//! │    │          NOTHING cleared; cashier adjusts or retries               │
//! │    ▼                                                                    │
//! │  Cart view closes ──► reset() ──► items, discounts, payment method,    │
//! │                                   order type all back to defaults       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Single-owner and event-driven: every mutation happens in response to one
//! cashier action or one completed network call. The only suspension points
//! are the catalog fetch and the submission. The `submitting` flag guards
//! the submission re-entrantly (a duplicate rapid submit must not
//! double-charge); no cancellation of an in-flight submission is supported.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use brew_core::cart::{Cart, LineItem};
use brew_core::discount::DiscountSelection;
use brew_core::pricing::{subtotal, AddonPriceTable};
use brew_core::types::{AddonSelection, DiscountCatalog, OrderType, PaymentMethod};
use brew_core::validation::validate_gcash_reference;
use brew_core::{CoreError, Money, ValidationError};

use crate::catalog::CatalogSource;
use crate::error::{TerminalError, TerminalResult};
use crate::sales::{SaleLineItem, SalePayload, SalesSink};

// =============================================================================
// Totals
// =============================================================================

/// The three figures the cart summary shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Cart Session
// =============================================================================

/// The state of one open cart view.
///
/// Owns exactly one [`Cart`] and one [`DiscountSelection`]; both live and
/// die with the session. The catalog snapshot is fetched once per session
/// and read-only afterwards.
#[derive(Debug)]
pub struct CartSession {
    /// Session id, for log correlation only.
    id: Uuid,
    opened_at: DateTime<Utc>,

    cart: Cart,
    selection: DiscountSelection,
    catalog: DiscountCatalog,
    order_type: OrderType,
    payment_method: PaymentMethod,
    prices: AddonPriceTable,

    /// Re-entrancy guard around submission.
    submitting: bool,
}

impl CartSession {
    /// Opens a session with the configured add-on price table.
    ///
    /// The catalog starts empty; call [`CartSession::load_catalog`] once
    /// the view is open.
    pub fn new(prices: AddonPriceTable) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "Cart session opened");
        CartSession {
            id,
            opened_at: Utc::now(),
            cart: Cart::new(),
            selection: DiscountSelection::new(),
            catalog: DiscountCatalog::empty(),
            order_type: OrderType::default(),
            payment_method: PaymentMethod::default(),
            prices,
            submitting: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetches the discount catalog snapshot for this session.
    ///
    /// On failure the previous snapshot (usually empty) is kept and the
    /// error is surfaced; the cart itself remains usable without discounts.
    pub async fn load_catalog(&mut self, source: &dyn CatalogSource) -> TerminalResult<usize> {
        let catalog = source.fetch_active().await?;
        let count = catalog.len();
        info!(session = %self.id, rules = count, "Catalog snapshot loaded");
        self.catalog = catalog;
        Ok(count)
    }

    pub fn catalog(&self) -> &DiscountCatalog {
        &self.catalog
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds a line item, merging into an existing row with the same
    /// (name, add-on signature).
    pub fn add_item(&mut self, item: LineItem) -> TerminalResult<()> {
        self.cart.add_or_merge(item)?;
        Ok(())
    }

    /// Adds `delta` to a row's quantity; at zero or below the row goes away.
    pub fn update_quantity(&mut self, index: usize, delta: i64) {
        self.cart.update_quantity(index, delta);
    }

    /// Removes a row unconditionally.
    pub fn remove_item(&mut self, index: usize) {
        self.cart.remove(index);
    }

    /// Replaces a row's add-on selection (re-merging any duplicate row the
    /// change produces).
    pub fn set_addons(&mut self, index: usize, addons: AddonSelection) {
        self.cart.set_addons(index, addons);
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.order_type = order_type;
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    // =========================================================================
    // Discount Workflow
    // =========================================================================

    /// Opens the discount selection workflow (snapshots applied → staged).
    pub fn open_discounts(&mut self) {
        self.selection.open();
    }

    /// Toggles a staged discount; a no-op for unknown or inapplicable ids.
    /// Returns whether the staged set changed.
    pub fn toggle_discount(&mut self, id: &str) -> bool {
        self.selection
            .toggle(id, &self.catalog, &self.cart, &self.prices)
    }

    /// Commits the staged set as applied.
    pub fn commit_discounts(&mut self) {
        self.selection.commit();
    }

    /// Discards the staged set, leaving applied untouched.
    pub fn cancel_discounts(&mut self) {
        self.selection.cancel();
    }

    pub fn selection(&self) -> &DiscountSelection {
        &self.selection
    }

    /// Discount amount for the staged set (what the open dialog previews).
    pub fn staged_discount(&self) -> Money {
        self.selection
            .staged_amount(&self.catalog, &self.cart, &self.prices)
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Subtotal / discount / total for the summary panel.
    ///
    /// Applied ids that no longer resolve or no longer apply are excluded
    /// from the discount figure and logged; they stay in the applied set
    /// until the cashier reopens the selection workflow.
    pub fn totals(&self) -> SessionTotals {
        let cart_subtotal = subtotal(&self.cart, &self.prices);
        let breakdown = self
            .selection
            .applied_breakdown(&self.catalog, &self.cart, &self.prices);

        if !breakdown.skipped.is_empty() {
            warn!(
                session = %self.id,
                skipped = ?breakdown.skipped,
                "Applied discounts excluded from amount (stale or drifted)"
            );
        }

        SessionTotals {
            subtotal: cart_subtotal,
            discount: breakdown.amount,
            total: cart_subtotal.saturating_sub_to_zero(breakdown.amount),
        }
    }

    // =========================================================================
    // Transaction Assembly & Submission
    // =========================================================================

    /// Assembles the submittable payload from the current session state.
    ///
    /// ## Errors
    /// - empty cart
    /// - GCash payment without a captured reference, or a malformed one
    ///
    /// Applied ids that no longer resolve in the catalog are dropped from
    /// the name list (catalog drift between staging and submission).
    pub fn build_payload(&self, gcash_reference: Option<&str>) -> TerminalResult<SalePayload> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let gcash_reference = match self.payment_method {
            PaymentMethod::Gcash => {
                let reference = gcash_reference.ok_or(TerminalError::Validation(
                    ValidationError::Required {
                        field: "gcashReference".to_string(),
                    },
                ))?;
                validate_gcash_reference(reference)?;
                Some(reference.trim().to_string())
            }
            PaymentMethod::Cash => None,
        };

        let applied_discounts: Vec<String> = self
            .selection
            .applied()
            .iter()
            .filter_map(|id| self.catalog.rule(id).map(|rule| rule.name.clone()))
            .collect();

        Ok(SalePayload {
            cart_items: self.cart.items().iter().map(SaleLineItem::from).collect(),
            order_type: self.order_type,
            payment_method: self.payment_method,
            applied_discounts,
            gcash_reference,
        })
    }

    /// Submits the assembled transaction to the sales sink.
    ///
    /// On success the cart and both discount sets are cleared and the
    /// accepted payload is returned as the confirmation signal. On any
    /// failure the whole session state is left untouched so the cashier
    /// can retry or adjust without re-entering the order.
    pub async fn submit(
        &mut self,
        sink: &dyn SalesSink,
        gcash_reference: Option<&str>,
    ) -> TerminalResult<SalePayload> {
        if self.submitting {
            return Err(TerminalError::SubmissionInProgress);
        }

        // Validate and assemble before flagging in-flight: a rejected
        // payload is a local failure with no state change.
        let payload = self.build_payload(gcash_reference)?;

        self.submitting = true;
        let result = sink.submit_sale(&payload).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(
                    session = %self.id,
                    items = payload.cart_items.len(),
                    discounts = payload.applied_discounts.len(),
                    "Transaction accepted; clearing session state"
                );
                self.cart.clear();
                self.selection.clear();
                Ok(payload)
            }
            Err(e) => {
                warn!(session = %self.id, error = %e, "Transaction failed; state preserved");
                Err(e)
            }
        }
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Returns the whole session to defaults (cart view closed).
    pub fn reset(&mut self) {
        debug!(session = %self.id, "Cart session reset");
        self.cart.clear();
        self.selection.clear();
        self.catalog = DiscountCatalog::empty();
        self.order_type = OrderType::default();
        self.payment_method = PaymentMethod::default();
        self.submitting = false;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
