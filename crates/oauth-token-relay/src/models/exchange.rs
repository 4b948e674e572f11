//! Incoming exchange request and outbound token request.

use bytes::Bytes;
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;
use url::form_urlencoded;

use crate::config::{Config, provider};

/// Provider token response, kept as the exact bytes the provider sent.
///
/// Construction checks that the body is well-formed JSON without building a
/// value, so key order and number text survive the relay untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    body: Bytes,
}

impl TokenResponse {
    /// Wrap a provider body after checking it is a single JSON document.
    pub fn from_bytes(body: Bytes) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(Self { body })
    }

    /// Raw body bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Consume into the raw body bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Parse the body into a JSON value.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Body of `POST /auth/amazon`.
///
/// `code` is kept as a raw JSON value so that a missing or oddly typed code
/// still reaches the provider instead of failing locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExchangeRequest {
    #[serde(default)]
    pub code: Option<Value>,
}

impl ExchangeRequest {
    /// Parse a request body. Anything that is not a JSON object yields a
    /// request without a code.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The code as it will be forwarded.
    ///
    /// Strings pass verbatim, numbers and booleans use their JSON text, and
    /// everything else (absent, null, arrays, objects) becomes empty.
    #[must_use]
    pub fn code(&self) -> String {
        match &self.code {
            Some(Value::String(code)) => code.clone(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            _ => String::new(),
        }
    }
}

/// Form body sent to the provider token endpoint.
///
/// Field order is the wire order.
#[derive(Clone, Copy)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub code: &'a str,
    pub redirect_uri: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl<'a> TokenRequest<'a> {
    /// Build the exchange form for `code` from the relay configuration.
    #[must_use]
    pub fn new(config: &'a Config, code: &'a str) -> Self {
        Self {
            grant_type: provider::GRANT_TYPE,
            code,
            redirect_uri: &config.redirect_uri,
            client_id: &config.client_id,
            client_secret: &config.client_secret,
        }
    }

    /// Encode as `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", self.grant_type)
            .append_pair("code", self.code)
            .append_pair("redirect_uri", self.redirect_uri)
            .append_pair("client_id", self.client_id)
            .append_pair("client_secret", self.client_secret)
            .finish()
    }
}

impl std::fmt::Debug for TokenRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("redirect_uri", &self.redirect_uri)
            .field("client_id", &self.client_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_from_json_body() {
        let req = ExchangeRequest::from_body(br#"{"code":"VALID123"}"#);
        assert_eq!(req.code(), "VALID123");
    }

    #[test]
    fn test_missing_code_is_empty() {
        assert_eq!(ExchangeRequest::from_body(b"{}").code(), "");
        assert_eq!(ExchangeRequest::from_body(br#"{"code":null}"#).code(), "");
    }

    #[test]
    fn test_unparseable_body_is_empty() {
        assert_eq!(ExchangeRequest::from_body(b"").code(), "");
        assert_eq!(ExchangeRequest::from_body(b"{ broken").code(), "");
        assert_eq!(ExchangeRequest::from_body(b"[1,2]").code(), "");
        assert_eq!(ExchangeRequest::from_body(br#""VALID123""#).code(), "");
    }

    #[test]
    fn test_scalar_code_uses_json_text() {
        assert_eq!(ExchangeRequest::from_body(br#"{"code":123}"#).code(), "123");
        assert_eq!(ExchangeRequest::from_body(br#"{"code":true}"#).code(), "true");
        assert_eq!(ExchangeRequest::from_body(br#"{"code":{"a":1}}"#).code(), "");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = json!({"code": "abc", "state": "xyz"}).to_string();
        assert_eq!(ExchangeRequest::from_body(body.as_bytes()).code(), "abc");
    }

    #[test]
    fn test_token_request_wire_order() {
        let config = Config::new("cid", "csecret", 3000);
        let encoded = TokenRequest::new(&config, "a b&c").encode();
        assert_eq!(
            encoded,
            "grant_type=authorization_code&code=a+b%26c\
             &redirect_uri=https%3A%2F%2Fyourwebsite.webflow.io%2Fcallback\
             &client_id=cid&client_secret=csecret"
        );
    }

    #[test]
    fn test_token_response_keeps_raw_bytes() {
        let raw = r#"{"z":1,"a":123456789012345678901234567890,"f":1e3}"#;
        let token = TokenResponse::from_bytes(Bytes::from_static(raw.as_bytes())).unwrap();
        assert_eq!(token.as_bytes(), raw.as_bytes());
        assert_eq!(token.json().unwrap()["z"], 1);
    }

    #[test]
    fn test_token_response_rejects_non_json() {
        assert!(TokenResponse::from_bytes(Bytes::from_static(b"<html>")).is_err());
        assert!(TokenResponse::from_bytes(Bytes::from_static(b"{} trailing")).is_err());
        assert!(TokenResponse::from_bytes(Bytes::new()).is_err());
    }

    #[test]
    fn test_token_request_debug_hides_secret() {
        let config = Config::new("cid", "super-secret", 3000);
        let debug = format!("{:?}", TokenRequest::new(&config, "code"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("cid"));
    }
}
