//! In-memory product store for development and testing.
//!
//! Records live in a `BTreeMap` behind an `Arc<RwLock<_>>`; nothing is
//! persisted. Scans page by key order with a configurable page size so the
//! continuation-token loop is exercisable without a real table.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{ProductRecord, ProductStore, Result, ScanPage, ScanToken, StoreError, KEY_ATTRIBUTE};

const DEFAULT_SCAN_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Arc<RwLock<BTreeMap<String, ProductRecord>>>,
    scan_page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_SCAN_PAGE_SIZE)
    }

    pub fn with_page_size(scan_page_size: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            scan_page_size: scan_page_size.max(1),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn get_item(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        let records = self.records.read().await;
        Ok(records.get(product_id).cloned())
    }

    async fn scan(&self, start: Option<ScanToken>) -> Result<ScanPage> {
        let start_key = match start {
            Some(ScanToken(Value::String(key))) => Some(key),
            Some(ScanToken(other)) => {
                return Err(StoreError::Conversion(format!(
                    "invalid continuation token: {other}"
                )))
            }
            None => None,
        };

        let lower = match start_key {
            Some(key) => Bound::Excluded(key),
            None => Bound::Unbounded,
        };

        let records = self.records.read().await;
        let mut items = Vec::new();
        let mut last_key = None;
        let mut next = None;

        for (key, record) in records.range((lower, Bound::Unbounded)) {
            if items.len() == self.scan_page_size {
                next = last_key.map(|k: String| ScanToken(Value::String(k)));
                break;
            }
            items.push(record.clone());
            last_key = Some(key.clone());
        }

        Ok(ScanPage { items, next })
    }

    async fn put_item(&self, item: ProductRecord) -> Result<()> {
        let product_id = item
            .get(KEY_ATTRIBUTE)
            .and_then(Value::as_str)
            .ok_or(StoreError::MissingKey(KEY_ATTRIBUTE))?
            .to_string();

        let mut records = self.records.write().await;
        records.insert(product_id, item);
        Ok(())
    }

    async fn update_item(
        &self,
        product_id: &str,
        attribute: &str,
        value: Value,
    ) -> Result<ProductRecord> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(product_id)
            .ok_or_else(|| StoreError::ConditionFailed {
                key: product_id.to_string(),
            })?;
        record.insert(attribute.to_string(), value.clone());

        let mut updated = Map::new();
        updated.insert(attribute.to_string(), value);
        Ok(updated)
    }

    async fn delete_item(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        let mut records = self.records.write().await;
        Ok(records.remove(product_id))
    }
}
