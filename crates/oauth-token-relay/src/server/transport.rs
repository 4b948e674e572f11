//! Router and handler for `POST /auth/amazon`.
//!
//! The route answers 200 with the provider's JSON or 500 with
//! `{"error": message}`. Nothing else.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::client::TokenExchangeClient;
use crate::error::ExchangeError;
use crate::models::{ExchangeRequest, TokenResponse};

/// Exchange route path.
pub const EXCHANGE_PATH: &str = "/auth/amazon";

/// Shared state for HTTP handlers.
pub struct RelayState {
    pub client: TokenExchangeClient,
}

/// Create the relay router.
pub fn create_router(client: TokenExchangeClient) -> Router {
    let state = Arc::new(RelayState { client });

    Router::new()
        .route(EXCHANGE_PATH, post(handle_exchange))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle `POST /auth/amazon`.
///
/// The body is read raw so a missing or malformed code still goes to the
/// provider and fails there.
async fn handle_exchange(State(state): State<Arc<RelayState>>, body: Bytes) -> Response {
    let request = ExchangeRequest::from_body(&body);

    match state.client.exchange_code(&request.code()).await {
        Ok(token) => {
            tracing::info!("Token exchange succeeded");
            token.into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, status = ?e.status(), "Token exchange failed");
            e.into_response()
        }
    }
}

impl IntoResponse for TokenResponse {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.into_bytes(),
        )
            .into_response()
    }
}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}
