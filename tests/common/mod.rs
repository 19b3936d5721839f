use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use product_inventory_api::config::AppConfig;
use product_inventory_api::store::MemoryStore;
use product_inventory_api::{app, AppState};

pub struct TestServer {
    pub base_url: String,
}

/// Starts the real app on an ephemeral port, backed by an in-memory store
/// with the given scan page size.
pub async fn start_server(scan_page_size: usize) -> Result<TestServer> {
    let state = AppState {
        store: Arc::new(MemoryStore::with_page_size(scan_page_size)),
        config: Arc::new(AppConfig::default()),
    };

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app(state)).await {
            eprintln!("server error: {e}");
        }
    });

    Ok(TestServer {
        base_url: format!("http://{addr}"),
    })
}
