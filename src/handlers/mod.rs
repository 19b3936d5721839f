//! Request routing and the five product operations.
//!
//! [`dispatch`] selects exactly one operation from an exact-match table of
//! (method, path) pairs. Anything else, including a matched pair whose
//! parameter or body extraction fails, answers 404 "Not Found". Storage
//! failures are logged with full detail and surface to the caller only as a
//! 500 with a short generic message.

use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::api::event::RequestEvent;
use crate::api::response::ResponseEnvelope;
use crate::store::{ProductRecord, ProductStore, KEY_ATTRIBUTE};
use crate::AppState;

pub const PRODUCT_PATH: &str = "/product";
pub const PRODUCTS_PATH: &str = "/products";

/// Dispatches one request event to the operation matching its (method, path)
/// pair.
pub async fn dispatch(state: &AppState, event: &RequestEvent) -> ResponseEnvelope {
    info!(method = %event.http_method, path = %event.path, "handling request");

    let store = state.store.as_ref();
    match (event.http_method.as_str(), event.path.as_str()) {
        ("GET", PRODUCT_PATH) => match event.query_param(KEY_ATTRIBUTE) {
            Some(product_id) => get_product(store, product_id).await,
            None => routing_miss(event),
        },
        ("GET", PRODUCTS_PATH) => match scan_limit(event, state.config.scan_limit_max) {
            Some(limit) => get_products(store, limit).await,
            None => routing_miss(event),
        },
        ("POST", PRODUCT_PATH) => match event.json_body() {
            Some(item) => save_product(store, item).await,
            None => routing_miss(event),
        },
        ("PATCH", PRODUCT_PATH) => match extract_update(event) {
            Some((product_id, update_key, update_value)) => {
                modify_product(store, &product_id, &update_key, update_value).await
            }
            None => routing_miss(event),
        },
        ("DELETE", PRODUCT_PATH) => match extract_product_id(event) {
            Some(product_id) => delete_product(store, &product_id).await,
            None => routing_miss(event),
        },
        _ => routing_miss(event),
    }
}

/// GET /product - fetch a single product by id.
async fn get_product(store: &dyn ProductStore, product_id: &str) -> ResponseEnvelope {
    match store.get_item(product_id).await {
        Ok(Some(record)) => ResponseEnvelope::ok(Value::Object(record)),
        Ok(None) => ResponseEnvelope::not_found(json!({
            "Message": format!("ProductId: {product_id} not found"),
        })),
        Err(err) => {
            error!(error = %err, product_id, "error getting product");
            ResponseEnvelope::server_error("Error getting product")
        }
    }
}

/// GET /products - fetch the full table, following continuation tokens until
/// the store signals completion (or the optional limit is reached).
async fn get_products(store: &dyn ProductStore, limit: Option<usize>) -> ResponseEnvelope {
    let mut products: Vec<Value> = Vec::new();
    let mut start = None;

    loop {
        let page = match store.scan(start).await {
            Ok(page) => page,
            Err(err) => {
                error!(error = %err, "error getting products");
                return ResponseEnvelope::server_error("Error getting products");
            }
        };

        products.extend(page.items.into_iter().map(Value::Object));

        if let Some(max) = limit {
            if products.len() >= max {
                products.truncate(max);
                break;
            }
        }

        match page.next {
            Some(token) => start = Some(token),
            None => break,
        }
    }

    ResponseEnvelope::ok(json!({ "products": products }))
}

/// POST /product - write the submitted product, overwriting any existing key.
async fn save_product(store: &dyn ProductStore, item: ProductRecord) -> ResponseEnvelope {
    match store.put_item(item.clone()).await {
        Ok(()) => ResponseEnvelope::ok(json!({
            "Operation": "SAVE",
            "Message": "SUCCESS",
            "Item": item,
        })),
        Err(err) => {
            error!(error = %err, "error saving product");
            ResponseEnvelope::server_error("Error saving product")
        }
    }
}

/// PATCH /product - set exactly one named attribute on an existing product.
async fn modify_product(
    store: &dyn ProductStore,
    product_id: &str,
    update_key: &str,
    update_value: Value,
) -> ResponseEnvelope {
    match store.update_item(product_id, update_key, update_value).await {
        Ok(updated) => ResponseEnvelope::ok(json!({
            "Operation": "UPDATE",
            "Message": "SUCCESS",
            "UpdatedAttributes": updated,
        })),
        Err(err) => {
            error!(error = %err, product_id, update_key, "error modifying product");
            ResponseEnvelope::server_error("Error modifying product")
        }
    }
}

/// DELETE /product - remove a product, echoing the prior value when one
/// existed. Deleting a missing key is not an error.
async fn delete_product(store: &dyn ProductStore, product_id: &str) -> ResponseEnvelope {
    match store.delete_item(product_id).await {
        Ok(prior) => ResponseEnvelope::ok(json!({
            "Operation": "DELETE",
            "Message": "SUCCESS",
            "deletedItem": prior,
        })),
        Err(err) => {
            error!(error = %err, product_id, "error deleting product");
            ResponseEnvelope::server_error("Error deleting product")
        }
    }
}

fn routing_miss(event: &RequestEvent) -> ResponseEnvelope {
    debug!(method = %event.http_method, path = %event.path, "no matching operation");
    ResponseEnvelope::not_found(Value::String("Not Found".to_string()))
}

fn extract_product_id(event: &RequestEvent) -> Option<String> {
    let body = event.json_body()?;
    body.get(KEY_ATTRIBUTE)?.as_str().map(str::to_string)
}

fn extract_update(event: &RequestEvent) -> Option<(String, String, Value)> {
    let body = event.json_body()?;
    let product_id = body.get(KEY_ATTRIBUTE)?.as_str()?.to_string();
    let update_key = body.get("updateKey")?.as_str()?.to_string();
    let update_value = body.get("updateValue")?.clone();
    Some((product_id, update_key, update_value))
}

/// Caller-supplied limits are clamped by configuration; an absent limit keeps
/// the unbounded full-scan behavior. A limit that is present but not a number
/// is a failed extraction, `None`.
fn scan_limit(event: &RequestEvent, max: Option<usize>) -> Option<Option<usize>> {
    match event.query_param("limit") {
        None => Some(None),
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .map(|requested| Some(max.map_or(requested, |m| requested.min(m)))),
    }
}
