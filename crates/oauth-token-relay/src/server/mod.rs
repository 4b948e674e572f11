//! HTTP server for the token exchange relay.

pub mod transport;

use crate::client::TokenExchangeClient;
use crate::config::Config;

/// Relay server: one listener, one route.
pub struct RelayServer {
    client: TokenExchangeClient,
}

impl RelayServer {
    /// Create a new relay server.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self { client: TokenExchangeClient::new(config)? })
    }

    /// Build the router without binding a listener.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        transport::create_router(self.client.clone())
    }

    /// Bind the configured port and serve until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error if the port cannot be bound or the server fails.
    pub async fn run_http(self) -> anyhow::Result<()> {
        let addr = self.client.config().bind_addr();
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(addr = %addr, "Server running on port {}", addr.port());

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for RelayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayServer").field("client", &self.client).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
