//! Configuration for the token exchange relay.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use url::Url;

/// Provider constants.
pub mod provider {
    /// Login with Amazon token endpoint.
    pub const TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";

    /// Redirect URI registered with the provider. Must match the one used
    /// for the consent redirect exactly.
    pub const REDIRECT_URI: &str = "https://yourwebsite.webflow.io/callback";

    /// Grant type sent with every exchange.
    pub const GRANT_TYPE: &str = "authorization_code";

    /// Listening port when `PORT` is unset.
    pub const DEFAULT_PORT: u16 = 3000;
}

/// Relay configuration, built once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    /// OAuth client id issued by the provider.
    pub client_id: String,

    /// OAuth client secret issued by the provider.
    pub client_secret: String,

    /// Redirect URI sent with the exchange.
    pub redirect_uri: String,

    /// Token endpoint URL (overridable for testing with mock servers).
    pub token_url: String,

    /// HTTP listening port.
    pub port: u16,

    /// Whole-request timeout for the provider call. `None` keeps the
    /// transport default.
    pub request_timeout: Option<Duration>,

    /// Connection timeout for the provider call. `None` keeps the
    /// transport default.
    pub connect_timeout: Option<Duration>,
}

impl Config {
    /// Create a production configuration for the fixed provider.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, port: u16) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: provider::REDIRECT_URI.to_string(),
            token_url: provider::TOKEN_URL.to_string(),
            port,
            request_timeout: None,
            connect_timeout: None,
        }
    }

    /// Create a test configuration pointing at a mock provider.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            redirect_uri: provider::REDIRECT_URI.to_string(),
            token_url: format!("{}/auth/o2/token", base_url.trim_end_matches('/')),
            port: 0,
            request_timeout: Some(Duration::from_secs(5)),
            connect_timeout: Some(Duration::from_secs(2)),
        }
    }

    /// Check that the configuration can drive an exchange.
    ///
    /// # Errors
    ///
    /// Returns error if the client id is empty or either URL is not an
    /// absolute http(s) URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.client_id.trim().is_empty() {
            bail!("client id must not be empty");
        }
        check_http_url("token URL", &self.token_url)?;
        check_http_url("redirect URI", &self.redirect_uri)?;
        Ok(())
    }

    /// Address the HTTP listener binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn check_http_url(label: &str, value: &str) -> anyhow::Result<()> {
    let url = Url::parse(value).with_context(|| format!("invalid {label}: {value}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("{label} must use http or https, got {other}"),
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("token_url", &self.token_url)
            .field("port", &self.port)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_uses_fixed_provider() {
        let config = Config::new("id", "secret", 3000);
        assert_eq!(config.token_url, provider::TOKEN_URL);
        assert_eq!(config.redirect_uri, provider::REDIRECT_URI);
        assert!(config.request_timeout.is_none());
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn test_for_testing_points_at_mock() {
        let config = Config::for_testing("http://127.0.0.1:9999/");
        assert_eq!(config.token_url, "http://127.0.0.1:9999/auth/o2/token");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_client_id() {
        let config = Config::new("  ", "secret", 3000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_token_url() {
        let mut config = Config::new("id", "secret", 3000);
        config.token_url = "ftp://example.com/token".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));

        config.token_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_addr_listens_on_all_interfaces() {
        let config = Config::new("id", "secret", 8080);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
    }
}
