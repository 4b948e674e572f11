//! Error types for the token exchange relay.
//!
//! Every variant surfaces to the HTTP caller the same way: status 500 with the
//! `Display` message in an `{"error": ...}` body. The variants only exist so
//! logs and tests can tell the failures apart.

/// Errors from a single authorization code exchange.
#[derive(thiserror::Error, Debug)]
pub enum ExchangeError {
    /// Connection, DNS, TLS or timeout failure talking to the provider.
    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for logging
        body: String,
    },

    /// Provider answered 2xx but the body was not JSON.
    #[error("Failed to parse token response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ExchangeError {
    /// Create a rejected error.
    #[must_use]
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected { status, body: body.into() }
    }

    /// Provider status code, if the provider answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
