use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration, built from defaults plus env-var overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the product table.
    pub table_name: String,
    /// AWS region for the DynamoDB backend.
    pub aws_region: String,
    /// Custom endpoint URL (for local DynamoDB).
    pub aws_endpoint_url: Option<String>,
    /// Which store implementation to construct at startup.
    pub store_backend: StoreBackend,
    /// Port the HTTP listener binds.
    pub port: u16,
    /// Upper bound applied to caller-supplied `limit` values on GET /products.
    pub scan_limit_max: Option<usize>,
    /// Scan page size for the in-memory backend.
    pub memory_scan_page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table_name: "product-inventory".to_string(),
            aws_region: "us-east-1".to_string(),
            aws_endpoint_url: None,
            store_backend: StoreBackend::DynamoDb,
            port: 3000,
            scan_limit_max: None,
            memory_scan_page_size: 100,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PRODUCT_TABLE_NAME") {
            self.table_name = v;
        }
        if let Ok(v) = env::var("AWS_REGION") {
            self.aws_region = v;
        }
        if let Ok(v) = env::var("AWS_ENDPOINT_URL") {
            self.aws_endpoint_url = Some(v);
        }
        if let Ok(v) = env::var("STORE_BACKEND") {
            self.store_backend = match v.to_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                _ => StoreBackend::DynamoDb,
            };
        }
        // Allow deployments to override port via env
        if let Some(v) = env::var("PRODUCT_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
        {
            self.port = v.parse().unwrap_or(self.port);
        }
        if let Ok(v) = env::var("SCAN_LIMIT_MAX") {
            self.scan_limit_max = v.parse().ok();
        }
        if let Ok(v) = env::var("MEMORY_SCAN_PAGE_SIZE") {
            self.memory_scan_page_size = v.parse().unwrap_or(self.memory_scan_page_size);
        }
        self
    }
}
