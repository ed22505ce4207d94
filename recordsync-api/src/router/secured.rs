use crate::{
    logic::{connection, record, schema},
    middleware::{auth, log_request_middleware},
    server::AppState,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use http::HeaderName;
use std::{iter::once, sync::Arc};
use tower_http::{sensitive_headers::SetSensitiveRequestHeadersLayer, trace::TraceLayer};
use tracing::warn;

/// Routes acting on behalf of an identified customer.
pub fn get_router(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let routes = Router::new()
        .nest("/records", record::get_router())
        .nest("/connections", connection::get_router())
        .nest("/schemas", schema::get_router())
        .route_layer(from_fn_with_state(state.clone(), auth::auth_middleware))
        .layer(from_fn(log_request_middleware))
        .layer(TraceLayer::new_for_http());

    match HeaderName::from_bytes(state.config.headers.auth_id_header.as_bytes()) {
        Ok(header) => routes.layer(SetSensitiveRequestHeadersLayer::new(once(header))),
        Err(e) => {
            warn!("Invalid auth id header name: {e}");
            routes
        }
    }
}
