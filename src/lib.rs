//! Request-routed CRUD API over a single-table product inventory store.

pub mod api;
pub mod config;
pub mod handlers;
pub mod store;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::event::RequestEvent;
use crate::api::response::ResponseEnvelope;
use crate::config::AppConfig;
use crate::store::ProductStore;

/// Request bodies larger than this are treated as absent.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state: the injected store plus runtime configuration.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub config: Arc<AppConfig>,
}

/// Builds the axum application. Axum only carries transport; every routing
/// decision happens in [`handlers::dispatch`].
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(handle_event)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_event(
    State(state): State<AppState>,
    query: Option<Query<HashMap<String, String>>>,
    request: Request,
) -> ResponseEnvelope {
    let event = event_from_request(query, request).await;
    handlers::dispatch(&state, &event).await
}

/// Flattens an HTTP request into the trigger-event shape the dispatcher
/// consumes.
async fn event_from_request(
    query: Option<Query<HashMap<String, String>>>,
    request: Request,
) -> RequestEvent {
    let (parts, body) = request.into_parts();

    let query_string_parameters = query
        .map(|Query(params)| params)
        .filter(|params| !params.is_empty());

    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8(bytes.to_vec()).ok(),
        _ => None,
    };

    RequestEvent {
        http_method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query_string_parameters,
        body,
    }
}
