//! DynamoDB-backed product store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::Value;

use crate::config::AppConfig;

use super::convert::{item_to_record, record_to_item, value_to_attribute};
use super::{ProductRecord, ProductStore, Result, ScanPage, ScanToken, StoreError, KEY_ATTRIBUTE};

#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a client from the ambient AWS configuration, honoring the
    /// custom endpoint override (for local DynamoDB).
    pub async fn connect(config: &AppConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    fn key(product_id: &str) -> AttributeValue {
        AttributeValue::S(product_id.to_string())
    }
}

#[async_trait]
impl ProductStore for DynamoDbStore {
    async fn get_item(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(product_id))
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        output.item.map(item_to_record).transpose()
    }

    async fn scan(&self, start: Option<ScanToken>) -> Result<ScanPage> {
        let mut request = self.client.scan().table_name(&self.table_name);
        if let Some(token) = start {
            request = request.set_exclusive_start_key(Some(token_to_key(token)?));
        }

        let output = request
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>>>()?;
        let next = output.last_evaluated_key.map(key_to_token).transpose()?;

        Ok(ScanPage { items, next })
    }

    async fn put_item(&self, item: ProductRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(&item)?))
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        Ok(())
    }

    async fn update_item(
        &self,
        product_id: &str,
        attribute: &str,
        value: Value,
    ) -> Result<ProductRecord> {
        // The attribute name goes through an expression placeholder, never
        // into the expression text itself. The condition keeps the update
        // from upserting a record that does not exist.
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(product_id))
            .update_expression("SET #attr = :value")
            .condition_expression("attribute_exists(#key)")
            .expression_attribute_names("#attr", attribute)
            .expression_attribute_names("#key", KEY_ATTRIBUTE)
            .expression_attribute_values(":value", value_to_attribute(&value)?)
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception())
                {
                    StoreError::ConditionFailed {
                        key: product_id.to_string(),
                    }
                } else {
                    StoreError::Backend(err.to_string())
                }
            })?;

        item_to_record(output.attributes.unwrap_or_default())
    }

    async fn delete_item(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(product_id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        output.attributes.map(item_to_record).transpose()
    }
}

fn token_to_key(token: ScanToken) -> Result<HashMap<String, AttributeValue>> {
    match token.0 {
        Value::Object(map) => record_to_item(&map),
        other => Err(StoreError::Conversion(format!(
            "invalid continuation token: {other}"
        ))),
    }
}

fn key_to_token(key: HashMap<String, AttributeValue>) -> Result<ScanToken> {
    item_to_record(key).map(|record| ScanToken(Value::Object(record)))
}
