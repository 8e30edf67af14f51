//! # Terminal Error Type
//!
//! Unified error type for session and boundary operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Brew POS                               │
//! │                                                                         │
//! │  Operation                  Failure                   Cashier sees      │
//! │  ─────────                  ───────                   ────────────      │
//! │                                                                         │
//! │  any network call ───────► Unauthenticated ─────────► "log in again"   │
//! │     (no token, checked BEFORE any request is sent)                      │
//! │                                                                         │
//! │  catalog fetch / submit ──► Api { detail } ─────────► backend message  │
//! │     (non-success response with a {"detail": ...} envelope)              │
//! │                                                                         │
//! │  catalog fetch / submit ──► Network(...) ───────────► generic message  │
//! │     (transport-level failure, no envelope to quote)                     │
//! │                                                                         │
//! │  submit while in flight ──► SubmissionInProgress ───► button disabled  │
//! │                                                                         │
//! │  ON FAILURE: cart, discounts, order type, payment method are all        │
//! │  left untouched so the cashier can retry without re-entering the order. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors surfaced by the cashier terminal layer.
///
/// None of these are fatal: every variant is recoverable with a retry or a
/// corrected input, and the session state survives all of them.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// No bearer credential is available.
    ///
    /// Raised before any request is sent: an engine operation that touches
    /// the network short-circuits here rather than producing a confusing
    /// 401 from the backend.
    #[error("Authentication error. Please log in again.")]
    Unauthenticated,

    /// The backend rejected the call and said why.
    #[error("{detail}")]
    Api { detail: String },

    /// Transport-level failure (timeout, DNS, connection refused).
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend's response body was not the shape we expect.
    #[error("Unexpected response from {service}: {reason}")]
    InvalidResponse { service: &'static str, reason: String },

    /// A submission is already in flight for this session.
    ///
    /// Guards against double-charging from a duplicate rapid submit.
    #[error("A transaction is already being processed")]
    SubmissionInProgress,

    /// Business rule violation from the core engine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl TerminalError {
    /// Builds an [`TerminalError::Api`] from a backend error envelope,
    /// falling back to a generic message when the envelope had no detail.
    pub fn api_or_generic(detail: Option<String>, fallback: &str) -> Self {
        TerminalError::Api {
            detail: detail.unwrap_or_else(|| fallback.to_string()),
        }
    }
}

/// Convenience type alias for Results with TerminalError.
pub type TerminalResult<T> = Result<T, TerminalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_or_generic_prefers_detail() {
        let err = TerminalError::api_or_generic(
            Some("Discount service unavailable".to_string()),
            "Failed to fetch discounts.",
        );
        assert_eq!(err.to_string(), "Discount service unavailable");
    }

    #[test]
    fn test_api_or_generic_falls_back() {
        let err = TerminalError::api_or_generic(None, "Failed to process transaction.");
        assert_eq!(err.to_string(), "Failed to process transaction.");
    }

    #[test]
    fn test_core_error_passthrough() {
        let err: TerminalError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }
}
