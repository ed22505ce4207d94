use super::SuccessResponse;
use crate::server::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use recordsync_domain::{AuthContext, ConnectedIntegration, RecordSyncError};
use std::sync::Arc;
use tracing::error;

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_connections))
}

/// Integrations the caller has connected; connections without an integration
/// are left out.
pub async fn list_connections(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<Arc<AuthContext>>,
) -> Result<Json<SuccessResponse<Vec<ConnectedIntegration>>>, RecordSyncError> {
    let page = match state.integration.list_connections(&auth).await {
        Ok(page) => page,
        Err(e) => {
            error!("Could not list connections for {}: {e}", auth.customer_id);
            return Err(e);
        }
    };

    let connected = page
        .items
        .iter()
        .filter_map(ConnectedIntegration::from_connection)
        .collect();

    Ok(Json(SuccessResponse::new(connected)))
}
