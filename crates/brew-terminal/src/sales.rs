//! # Sales Submission Sink
//!
//! The transaction payload and the REST client that delivers it to the
//! sales service.
//!
//! ## Payload Shape
//! ```text
//! POST {sales_url}/auth/sales/
//! Authorization: Bearer <token>
//! {
//!   "cartItems": [
//!     { "name": "Latte", "category": "Specialty Coffee", "price": 120.0,
//!       "quantity": 2, "addons": { "espressoShots": 1, ... } }
//!   ],
//!   "orderType": "Dine in",
//!   "paymentMethod": "GCash",
//!   "appliedDiscounts": ["Opening Promo"],
//!   "gcashReference": "1234567890123"      // null for cash sales
//! }
//! ```
//!
//! Prices go over the wire in pesos (the sales service's unit); the engine
//! converts from centavos only at this boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use brew_core::cart::LineItem;
use brew_core::types::{AddonSelection, OrderType, PaymentMethod};
use brew_core::Money;

use crate::auth::{require_bearer, SharedAuth};
use crate::config::TerminalConfig;
use crate::error::{TerminalError, TerminalResult};
use crate::http::{build_client, error_detail};

// =============================================================================
// Payload Types
// =============================================================================

/// One cart line as the sales service expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub name: String,
    pub category: String,
    /// Base unit price in pesos.
    pub price: f64,
    pub quantity: i64,
    /// Always present; a plain item carries the all-zero selection.
    pub addons: AddonSelection,
}

impl From<&LineItem> for SaleLineItem {
    fn from(item: &LineItem) -> Self {
        SaleLineItem {
            name: item.name.clone(),
            category: item.category.clone(),
            price: pesos(item.unit_price),
            quantity: item.quantity,
            addons: item.addons,
        }
    }
}

/// The submittable transaction payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub cart_items: Vec<SaleLineItem>,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    /// Display names of the applied discounts (ids that no longer resolve
    /// in the catalog are filtered out before this list is built).
    pub applied_discounts: Vec<String>,
    /// Reference number for GCash sales; `null` for cash.
    pub gcash_reference: Option<String>,
}

/// Centavos → pesos, for wire values only.
fn pesos(amount: Money) -> f64 {
    amount.cents() as f64 / 100.0
}

// =============================================================================
// Boundary Trait
// =============================================================================

/// Destination of assembled transactions.
#[async_trait]
pub trait SalesSink: Send + Sync {
    /// Submits one sale; `Ok` is the service's acknowledgment.
    async fn submit_sale(&self, payload: &SalePayload) -> TerminalResult<()>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// REST client for the sales service.
pub struct HttpSalesClient {
    client: reqwest::Client,
    base_url: String,
    auth: SharedAuth,
}

impl HttpSalesClient {
    pub fn new(config: &TerminalConfig, auth: SharedAuth) -> TerminalResult<Self> {
        Ok(HttpSalesClient {
            client: build_client(&config.http)?,
            base_url: config.endpoints.sales_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/auth/sales/", self.base_url)
    }
}

#[async_trait]
impl SalesSink for HttpSalesClient {
    async fn submit_sale(&self, payload: &SalePayload) -> TerminalResult<()> {
        // Unauthenticated short-circuit: no token, no request.
        let bearer = require_bearer(&self.auth).await?;

        debug!(
            endpoint = %self.endpoint(),
            items = payload.cart_items.len(),
            method = ?payload.payment_method,
            "Submitting sale"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(bearer)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let detail = error_detail(response).await;
            return Err(TerminalError::api_or_generic(
                detail,
                "Failed to process transaction.",
            ));
        }

        info!(items = payload.cart_items.len(), "Sale accepted by sales service");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::types::AddonKind;

    fn payload() -> SalePayload {
        let mut item = LineItem::new(
            "Latte",
            "Specialty Coffee",
            Money::from_cents(12000),
            2,
        );
        item.addons.set(AddonKind::EspressoShots, 1);

        SalePayload {
            cart_items: vec![SaleLineItem::from(&item)],
            order_type: OrderType::DineIn,
            payment_method: PaymentMethod::Gcash,
            applied_discounts: vec!["Opening Promo".to_string()],
            gcash_reference: Some("1234567890123".to_string()),
        }
    }

    #[test]
    fn test_payload_wire_shape() {
        let json = serde_json::to_value(payload()).unwrap();

        assert_eq!(json["orderType"], "Dine in");
        assert_eq!(json["paymentMethod"], "GCash");
        assert_eq!(json["appliedDiscounts"][0], "Opening Promo");
        assert_eq!(json["gcashReference"], "1234567890123");

        let item = &json["cartItems"][0];
        assert_eq!(item["name"], "Latte");
        assert_eq!(item["price"], 120.0);
        assert_eq!(item["quantity"], 2);
        assert_eq!(item["addons"]["espressoShots"], 1);
        assert_eq!(item["addons"]["seaSaltCream"], 0);
    }

    #[test]
    fn test_cash_sale_sends_null_reference() {
        let mut p = payload();
        p.payment_method = PaymentMethod::Cash;
        p.gcash_reference = None;

        let json = serde_json::to_value(p).unwrap();
        assert!(json["gcashReference"].is_null());
    }

    #[test]
    fn test_line_item_conversion_keeps_addons() {
        let mut item = LineItem::new("Mocha", "Premium Coffee", Money::from_cents(15050), 1);
        item.addons.set(AddonKind::SyrupSauces, 2);

        let wire = SaleLineItem::from(&item);
        assert_eq!(wire.price, 150.5);
        assert_eq!(wire.addons.syrup_sauces, 2);
    }

    #[tokio::test]
    async fn test_submit_requires_token_before_any_request() {
        let config = TerminalConfig::default();
        let client =
            HttpSalesClient::new(&config, crate::auth::AuthToken::new().into_shared()).unwrap();

        assert!(matches!(
            client.submit_sale(&payload()).await,
            Err(TerminalError::Unauthenticated)
        ));
    }
}
