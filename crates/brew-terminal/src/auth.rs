//! # Bearer Credential Store
//!
//! Holds the bearer token issued by the auth service. Token acquisition and
//! refresh belong to the login flow, outside this crate; the engine only
//! needs to attach the credential and to refuse network work without one.
//!
//! ## Unauthenticated Short-Circuit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every operation that touches the network calls require() FIRST:        │
//! │                                                                         │
//! │     token store ──► require() ──► Err(Unauthenticated)                  │
//! │                         │          (NO request was sent)                │
//! │                         ▼                                               │
//! │                  Ok(bearer) ──► Authorization: Bearer <token>           │
//! │                                                                         │
//! │  A missing credential is a local failure, never a 401 round-trip.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{TerminalError, TerminalResult};

/// Shared handle to the credential store.
///
/// The login flow writes it; every boundary client reads it per request,
/// so a re-login mid-shift takes effect without rebuilding the clients.
pub type SharedAuth = Arc<RwLock<AuthToken>>;

/// In-memory bearer token for the logged-in cashier.
#[derive(Debug, Clone, Default)]
pub struct AuthToken {
    token: Option<String>,
}

impl AuthToken {
    /// An empty store (nobody logged in).
    pub fn new() -> Self {
        AuthToken { token: None }
    }

    /// A store seeded with a token (login already completed).
    pub fn with_token(token: impl Into<String>) -> Self {
        AuthToken {
            token: Some(token.into()),
        }
    }

    /// Stores the credential after a successful login.
    pub fn set(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drops the credential (logout / session expiry).
    pub fn clear(&mut self) {
        self.token = None;
    }

    /// Whether a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the bearer token, or [`TerminalError::Unauthenticated`]
    /// when absent. Call before building any request.
    pub fn require(&self) -> TerminalResult<&str> {
        self.token
            .as_deref()
            .ok_or(TerminalError::Unauthenticated)
    }

    /// Wraps this store in a [`SharedAuth`] handle.
    pub fn into_shared(self) -> SharedAuth {
        Arc::new(RwLock::new(self))
    }
}

/// Reads the bearer token out of a shared store, failing before any
/// request is built when it is absent.
pub async fn require_bearer(auth: &SharedAuth) -> TerminalResult<String> {
    auth.read().await.require().map(str::to_string)
}
