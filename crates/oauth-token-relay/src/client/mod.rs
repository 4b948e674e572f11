//! Provider token endpoint client.
//!
//! One POST per exchange over a pooled reqwest client. No retries, no
//! caching: authorization codes are single-use, so a repeated call would
//! fail at the provider anyway.

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::config::Config;
use crate::error::{ExchangeError, ExchangeResult};
use crate::models::{TokenRequest, TokenResponse};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client that trades authorization codes for tokens.
#[derive(Clone)]
pub struct TokenExchangeClient {
    /// Pooled HTTP client.
    client: Client,

    /// Immutable relay configuration.
    config: Arc<Config>,
}

impl TokenExchangeClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or HTTP client
    /// initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers).gzip(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self { client: builder.build()?, config: Arc::new(config) })
    }

    /// Relay configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Exchange an authorization code for the provider's token response.
    ///
    /// The code is forwarded verbatim. On 2xx the body is checked to be JSON
    /// and returned byte for byte.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-2xx status, or a body that
    /// is not JSON.
    pub async fn exchange_code(&self, code: &str) -> ExchangeResult<TokenResponse> {
        let form = TokenRequest::new(&self.config, code).encode();

        tracing::debug!(token_url = %self.config.token_url, "Sending token exchange");

        let response = self
            .client
            .post(&self.config.token_url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Failed to read rejection body");
                String::new()
            });
            return Err(ExchangeError::rejected(status.as_u16(), body));
        }

        let body = response.bytes().await?;
        TokenResponse::from_bytes(body).map_err(ExchangeError::from)
    }
}

impl std::fmt::Debug for TokenExchangeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenExchangeClient").field("config", &self.config).finish()
    }
}
