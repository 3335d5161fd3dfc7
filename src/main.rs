//! itemstore entry point
//!
//! Startup order matters: the listener opens only after the database
//! connection succeeds. On a failed connection the error is logged and
//! the process returns without binding the socket; there is no retry.

use itemstore::config::Config;
use itemstore::http_server::HttpServer;
use itemstore::store::ItemStore;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "itemstore=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(_) => {
            tracing::error!("MONGODB_URI must be set");
            return;
        }
    };

    match ItemStore::connect(&config.database_url).await {
        Ok(store) => {
            tracing::info!("Connected to MongoDB");
            if let Err(e) = HttpServer::with_config(store, config.http).start().await {
                tracing::error!("Server error: {}", e);
            }
        }
        Err(e) => {
            tracing::error!("Error connecting to MongoDB: {}", e);
        }
    }
}
