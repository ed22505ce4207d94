use crate::server::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{extract::Query, Json};
use recordsync_domain::{ApplicationError, AuthContext, Connection, RecordSyncError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

pub mod connection;
pub mod record;
pub mod schema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct ReadResponse<T> {
    pub rows: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Unwraps a JSON body, turning a malformed one into a 400.
pub fn json_payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RecordSyncError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| ApplicationError::bad_request(&rejection.body_text(), None))
}

pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, RecordSyncError> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| ApplicationError::bad_request(&rejection.body_text(), None))
}

/// A present, non-blank string or a 400 carrying `message`. The value is
/// returned as sent.
pub fn required_str<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, RecordSyncError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApplicationError::bad_request(message, None))
}

pub fn required_fields(value: Option<&Value>) -> Result<&Map<String, Value>, RecordSyncError> {
    value
        .and_then(Value::as_object)
        .ok_or_else(|| ApplicationError::bad_request("Fields are required", None))
}

/// Finds the caller's connection to `integration_key`.
pub async fn resolve_connection(
    state: &AppState,
    auth: &AuthContext,
    integration_key: &str,
) -> Result<Connection, RecordSyncError> {
    let page = match state.integration.list_connections(auth).await {
        Ok(page) => page,
        Err(e) => {
            error!("Could not list connections for {}: {e}", auth.customer_id);
            return Err(e);
        }
    };

    page.find_by_integration_key(integration_key)
        .cloned()
        .ok_or_else(|| {
            ApplicationError::not_found(
                &format!("No connection found for integration: {integration_key}"),
                None,
            )
        })
}
