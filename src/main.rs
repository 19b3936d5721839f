use std::sync::Arc;

use product_inventory_api::config::{AppConfig, StoreBackend};
use product_inventory_api::store::{DynamoDbStore, MemoryStore, ProductStore};
use product_inventory_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PRODUCT_TABLE_NAME, AWS_REGION, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        table = %config.table_name,
        backend = ?config.store_backend,
        "starting product inventory api"
    );

    let store: Arc<dyn ProductStore> = match config.store_backend {
        StoreBackend::DynamoDb => Arc::new(DynamoDbStore::connect(&config).await),
        StoreBackend::Memory => {
            Arc::new(MemoryStore::with_page_size(config.memory_scan_page_size))
        }
    };

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{bind_addr}");

    let state = AppState {
        store,
        config: Arc::new(config),
    };
    axum::serve(listener, app(state)).await?;

    Ok(())
}
