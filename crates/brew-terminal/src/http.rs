//! Shared plumbing for the two REST boundary clients.

use std::time::Duration;

use serde::Deserialize;

use crate::config::HttpConfig;
use crate::error::TerminalResult;

/// Builds a reqwest client with the configured timeouts.
pub(crate) fn build_client(http: &HttpConfig) -> TerminalResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .timeout(Duration::from_secs(http.request_timeout_secs))
        .build()?)
}

/// The error envelope both backends speak on non-success responses.
///
/// `detail` carries the human-readable reason; absent on malformed bodies,
/// in which case callers fall back to a generic message.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub detail: Option<String>,
}

/// Extracts the `detail` string from a failed response body, tolerating
/// bodies that are not the expected envelope.
pub(crate) async fn error_detail(response: reqwest::Response) -> Option<String> {
    response
        .json::<ErrorEnvelope>()
        .await
        .ok()
        .and_then(|envelope| envelope.detail)
}
