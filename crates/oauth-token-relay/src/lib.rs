//! OAuth Token Relay
//!
//! Exchanges a Login with Amazon authorization code for an access token on
//! behalf of a browser client and hands the provider's JSON straight back.
//!
//! - **One route**: `POST /auth/amazon` with `{"code": "..."}`
//! - **Pass-through**: the token response is never parsed into a schema
//! - **One failure path**: every error becomes HTTP 500 `{"error": "..."}`
//!
//! # Example
//!
//! ```no_run
//! use oauth_token_relay::{config::Config, server::RelayServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new("client-id", "client-secret", 3000);
//!     RelayServer::new(config)?.run_http().await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;

pub use client::TokenExchangeClient;
pub use config::Config;
pub use error::{ExchangeError, ExchangeResult};
