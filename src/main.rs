use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use leadsheet::config::{Config, SheetPolicy, StoreBackend};
use leadsheet::store::{MemorySheetStore, SheetStore, SheetsApiStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config
    let config = Config::from_env().expect("Failed to load configuration");

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting Leadsheet");

    if config.sheet_policy == SheetPolicy::Active {
        tracing::warn!(
            "Sheet policy is 'active': rows land in whatever sheet the container \
             currently fronts, which can change outside this service"
        );
    }

    let store: Arc<dyn SheetStore> = match &config.store {
        StoreBackend::Sheets { base_url, token } => Arc::new(SheetsApiStore::new(
            base_url.clone(),
            config.spreadsheet_id.clone(),
            token.clone(),
        )),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; rows do not survive restarts");
            Arc::new(MemorySheetStore::new())
        }
    };

    let addr = SocketAddr::new(config.host, config.port);
    let app = leadsheet::build_app(store, config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
