use super::{query_params, SuccessResponse};
use crate::server::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query},
    routing::get,
    Json, Router,
};
use recordsync_domain::{
    schema::{default_schema, form_schema},
    ApplicationError, RecordSyncError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new().route("/:record_type", get(get_schema))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct SchemaQuery {
    #[serde(default)]
    pub form: bool,
}

pub async fn get_schema(
    Path(record_type): Path<String>,
    query: Result<Query<SchemaQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse<Value>>, RecordSyncError> {
    let query = query_params(query)?;

    let schema = default_schema(&record_type).ok_or_else(|| {
        ApplicationError::not_found(&format!("Schema not found: {record_type}"), None)
    })?;

    let schema = if query.form {
        form_schema(&schema)
    } else {
        schema
    };

    Ok(Json(SuccessResponse::new(schema)))
}
