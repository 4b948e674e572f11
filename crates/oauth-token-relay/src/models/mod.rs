//! Request-scoped data models.
//!
//! Nothing here outlives a single exchange.

pub mod exchange;

pub use exchange::{ExchangeRequest, TokenRequest, TokenResponse};
