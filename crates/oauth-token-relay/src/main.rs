//! OAuth Token Relay - Entry Point

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use oauth_token_relay::{
    config::{Config, provider},
    server::RelayServer,
};

#[derive(Parser, Debug)]
#[command(name = "oauth-token-relay")]
#[command(about = "Exchanges a Login with Amazon authorization code for an access token")]
#[command(version)]
struct Cli {
    /// OAuth client id issued by the provider
    #[arg(long, env = "CLIENT_ID")]
    client_id: String,

    /// OAuth client secret issued by the provider
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// HTTP server port
    #[arg(long, default_value_t = provider::DEFAULT_PORT, env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting OAuth token relay");

    let config = Config::new(cli.client_id, cli.client_secret, cli.port);
    tracing::debug!(?config, "Loaded configuration");

    RelayServer::new(config)?.run_http().await
}
