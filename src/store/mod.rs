//! Storage accessor for the product table.
//!
//! The table itself is an external collaborator reached through the
//! [`ProductStore`] trait: get-by-key, paginated scan, put, single-attribute
//! update, and delete-with-returned-old-value. Two backends exist:
//! - [`DynamoDbStore`] for the real table
//! - [`MemoryStore`] for development and tests

pub mod convert;
pub mod dynamodb;
pub mod memory;

pub use dynamodb::DynamoDbStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the mandatory key attribute on every product record.
pub const KEY_ATTRIBUTE: &str = "productId";

/// A product record as stored: attribute name to JSON value, keyed by
/// `productId`. No further schema is enforced.
pub type ProductRecord = Map<String, Value>;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    /// An update condition was not met, typically because the key does not
    /// exist in the table.
    #[error("update condition failed for key '{key}'")]
    ConditionFailed { key: String },

    /// A record is missing its key attribute on a write path that needs it.
    #[error("record is missing key attribute '{0}'")]
    MissingKey(&'static str),

    #[error("attribute conversion error: {0}")]
    Conversion(String),
}

/// Opaque continuation marker returned by a paginated scan. Absence signals
/// scan completion; callers pass it back verbatim to fetch the next page.
#[derive(Debug, Clone)]
pub struct ScanToken(pub(crate) Value);

/// One page of scan results.
#[derive(Debug)]
pub struct ScanPage {
    pub items: Vec<ProductRecord>,
    pub next: Option<ScanToken>,
}

/// The five operations the handlers need from the product table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetches a record by key, `None` if absent.
    async fn get_item(&self, product_id: &str) -> Result<Option<ProductRecord>>;

    /// Returns one page of the full-table scan, starting after `start`.
    async fn scan(&self, start: Option<ScanToken>) -> Result<ScanPage>;

    /// Writes a record unconditionally, overwriting any existing key.
    async fn put_item(&self, item: ProductRecord) -> Result<()>;

    /// Sets exactly one named attribute on an existing record and returns
    /// the attributes the store reports as updated. Fails with
    /// [`StoreError::ConditionFailed`] when the key does not exist.
    async fn update_item(
        &self,
        product_id: &str,
        attribute: &str,
        value: Value,
    ) -> Result<ProductRecord>;

    /// Deletes a key unconditionally and returns the prior record, `None`
    /// if the key did not exist. Deleting a missing key is not an error.
    async fn delete_item(&self, product_id: &str) -> Result<Option<ProductRecord>>;
}
