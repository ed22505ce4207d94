use crate::server::AppState;
use axum::{body::Body, extract::State, middleware::Next, response::Response};
use http::{HeaderMap, Request};
use recordsync_domain::{ApplicationError, AuthContext, RecordSyncError};
use std::sync::Arc;
use tracing::debug;

/// Resolves the calling customer from the identity headers and hands it to the
/// handlers as `Extension<Arc<AuthContext>>`.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, RecordSyncError> {
    let headers = &state.config.headers;

    let Some(auth) = AuthContext::resolve(
        header_value(req.headers(), &headers.auth_id_header),
        header_value(req.headers(), &headers.customer_name_header),
    ) else {
        debug!("Rejecting request to {} without customer identity", req.uri());
        return Err(ApplicationError::unauthorized("Unauthorized", None));
    };

    req.extensions_mut().insert(Arc::new(auth));

    Ok(next.run(req).await)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
