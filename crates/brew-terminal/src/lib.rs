//! # Brew Terminal
//!
//! The cashier terminal layer on top of `brew-core`: session state for one
//! open cart view, plus the HTTP boundaries to the discount and sales
//! services.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         brew-terminal                                   │
//! │                                                                         │
//! │  ┌───────────────┐      ┌──────────────────────────────────────┐        │
//! │  │ CartSession   │◄─────│ brew-core (pure pricing & discounts) │        │
//! │  │ (session.rs)  │      └──────────────────────────────────────┘        │
//! │  └──────┬────────┘                                                      │
//! │         │ trait seams (test with fakes, run with HTTP)                  │
//! │         ▼                                                               │
//! │  ┌───────────────┐     ┌────────────────┐                               │
//! │  │ CatalogSource │     │ SalesSink      │                               │
//! │  │ (catalog.rs)  │     │ (sales.rs)     │                               │
//! │  └──────┬────────┘     └──────┬─────────┘                               │
//! │         │ GET /api/discounts/ │ POST /auth/sales/                       │
//! │         ▼                     ▼                                         │
//! │     discount service      sales service                                 │
//! │                                                                         │
//! │  Cross-cutting: AuthToken (auth.rs), TerminalConfig (config.rs),        │
//! │  TerminalError (error.rs)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both service boundaries require a bearer token before any request goes
//! out; an unauthenticated terminal fails fast with a re-login prompt
//! instead of a network round trip.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
mod http;
pub mod sales;
pub mod session;

pub use auth::{AuthToken, SharedAuth};
pub use catalog::{CatalogSource, HttpCatalogClient};
pub use config::TerminalConfig;
pub use error::{TerminalError, TerminalResult};
pub use sales::{HttpSalesClient, SalePayload, SalesSink};
pub use session::{CartSession, SessionTotals};
