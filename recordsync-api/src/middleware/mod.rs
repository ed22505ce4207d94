pub mod auth;

use axum::{body::Body, extract::OriginalUri, middleware::Next, response::Response};
use http::{HeaderValue, Request};
use tracing::{info, Instrument};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs every request with its outcome and echoes a request id back to the
/// caller, reusing the incoming `x-request-id` when present.
pub async fn log_request_middleware(req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = request_path(&req);
    let span = tracing::info_span!("request", %request_id, %method, %path);

    let mut response = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| info!(status = response.status().as_u16(), "Request handled"));

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Path as the client sent it, before any `nest` stripped its prefix.
fn request_path(req: &Request<Body>) -> String {
    req.extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}
