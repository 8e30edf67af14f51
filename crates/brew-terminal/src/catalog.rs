//! # Discount Catalog Adapter
//!
//! Fetches the discount records from the discount service and normalizes
//! them into the engine's [`DiscountRule`] shape.
//!
//! ## Normalization Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              GET {discounts_url}/api/discounts/                         │
//! │                                                                         │
//! │  Wire record                       Normalized rule                      │
//! │  ───────────                       ───────────────                      │
//! │  id: 7                    ──────►  id: "7"                              │
//! │  status: "active"         ──────►  (filter: inactive records dropped)   │
//! │  type: "percentage"       ──┐                                           │
//! │  discount: "10.0%"        ──┴───►  kind: Percentage(1000 bps)           │
//! │  discount: "₱50.00"       ──────►  kind: FixedAmount(₱50.00)            │
//! │  minSpend: 200.0          ──────►  min_spend: ₱200.00                   │
//! │  application_type: "..."  ──────►  scope (unknown tag → Unrecognized)   │
//! │                                                                         │
//! │  A record that fails to parse is SKIPPED with a warning - one broken    │
//! │  promo must never take the whole catalog (or checkout) down.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The magnitude arrives embedded in a display string; `parse_magnitude`
//! strips everything but digits and the decimal point before parsing.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use brew_core::money::{DiscountRate, Money};
use brew_core::types::{DiscountCatalog, DiscountKind, DiscountRule, DiscountScope};
use brew_core::validation::validate_discount_rule;

use crate::auth::{require_bearer, SharedAuth};
use crate::config::TerminalConfig;
use crate::error::{TerminalError, TerminalResult};
use crate::http::{build_client, error_detail};

// =============================================================================
// Boundary Trait
// =============================================================================

/// Source of the per-session discount catalog snapshot.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the currently active rules, normalized.
    async fn fetch_active(&self) -> TerminalResult<DiscountCatalog>;
}

// =============================================================================
// Wire Record
// =============================================================================

/// One discount record as the discount service lists it.
///
/// Extra fields (`application`, `validFrom`, `validTo`, ...) are ignored;
/// the service filters validity dates itself via `status`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountRecord {
    pub id: i64,
    pub name: String,
    pub status: String,

    /// Kind tag: `"percentage"` or `"fixed_amount"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Display string carrying the magnitude, e.g. `"10.0%"` or `"₱50.00"`.
    pub discount: String,

    /// Minimum spend in pesos; zero means no minimum.
    #[serde(rename = "minSpend", default)]
    pub min_spend: f64,

    pub application_type: String,

    #[serde(default)]
    pub applicable_products: Vec<String>,

    #[serde(default)]
    pub applicable_categories: Vec<String>,
}

// =============================================================================
// Normalization
// =============================================================================

/// Extracts the bare number from a magnitude display string.
///
/// Keeps only digits and the decimal point, so `"₱50.00"`, `"10.0%"` and
/// `"50"` all parse.
pub fn parse_magnitude(display: &str) -> Option<f64> {
    let cleaned: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

/// Normalizes one wire record into an engine rule.
///
/// Returns `None` (the caller logs and skips) when the magnitude cannot be
/// parsed, the kind tag is unknown, or the result fails rule validation.
/// An unknown *scope* tag, by contrast, produces a valid rule with an
/// [`DiscountScope::Unrecognized`] scope: the rule stays visible but can
/// never apply.
pub fn normalize_record(record: &DiscountRecord) -> Option<DiscountRule> {
    let magnitude = parse_magnitude(&record.discount)?;

    let kind = match record.kind.as_str() {
        "percentage" => DiscountKind::Percentage(DiscountRate::from_percentage(magnitude)),
        "fixed_amount" => {
            DiscountKind::FixedAmount(Money::from_cents((magnitude * 100.0).round() as i64))
        }
        _ => return None,
    };

    let scope = match record.application_type.as_str() {
        "all_products" => DiscountScope::AllProducts,
        "specific_products" => DiscountScope::SpecificProducts(record.applicable_products.clone()),
        "specific_categories" => {
            DiscountScope::SpecificCategories(record.applicable_categories.clone())
        }
        other => DiscountScope::Unrecognized(other.to_string()),
    };

    let rule = DiscountRule {
        id: record.id.to_string(),
        name: record.name.clone(),
        kind,
        min_spend: Money::from_cents((record.min_spend * 100.0).round() as i64),
        scope,
    };

    validate_discount_rule(&rule).ok()?;
    Some(rule)
}

/// Filters to active records and normalizes them into a catalog snapshot.
///
/// Broken records are skipped with a warning rather than failing the fetch.
pub fn normalize_records(records: &[DiscountRecord]) -> DiscountCatalog {
    let mut rules = Vec::new();

    for record in records.iter().filter(|r| r.status == "active") {
        match normalize_record(record) {
            Some(rule) => rules.push(rule),
            None => {
                warn!(
                    id = record.id,
                    name = %record.name,
                    kind = %record.kind,
                    discount = %record.discount,
                    "Skipping discount record that failed normalization"
                );
            }
        }
    }

    DiscountCatalog::new(rules)
}

// =============================================================================
// HTTP Client
// =============================================================================

/// REST client for the discount service.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
    auth: SharedAuth,
}

impl HttpCatalogClient {
    pub fn new(config: &TerminalConfig, auth: SharedAuth) -> TerminalResult<Self> {
        Ok(HttpCatalogClient {
            client: build_client(&config.http)?,
            base_url: config.endpoints.discounts_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/discounts/", self.base_url)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_active(&self) -> TerminalResult<DiscountCatalog> {
        // Unauthenticated short-circuit: no token, no request.
        let bearer = require_bearer(&self.auth).await?;

        debug!(endpoint = %self.endpoint(), "Fetching discount catalog");

        let response = self
            .client
            .get(self.endpoint())
            .bearer_auth(bearer)
            .send()
            .await?;

        if !response.status().is_success() {
            let detail = error_detail(response).await;
            return Err(TerminalError::api_or_generic(
                detail,
                "Failed to fetch discounts. Please log in again.",
            ));
        }

        let records: Vec<DiscountRecord> =
            response
                .json()
                .await
                .map_err(|e| TerminalError::InvalidResponse {
                    service: "discounts",
                    reason: e.to_string(),
                })?;

        let catalog = normalize_records(&records);
        info!(
            fetched = records.len(),
            active = catalog.len(),
            "Discount catalog loaded"
        );
        Ok(catalog)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
