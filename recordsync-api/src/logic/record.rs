use super::{
    json_payload, query_params, required_fields, required_str, resolve_connection,
    MessageResponse, ReadResponse, SuccessResponse,
};
use crate::server::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use recordsync_domain::{
    ApplicationError, AuthContext, Record, RecordAction, RecordMutation, RecordQuery, RecordScope,
    RecordSyncError, DEFAULT_RECORD_ACTION,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::try_join;
use tracing::{error, info, warn};

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

pub fn get_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_records))
        .route("/create", post(create_record))
        .route("/update", put(update_record))
        .route("/delete", delete(delete_record))
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordPayload {
    #[serde(default)]
    pub integration_key: Option<String>,
    #[serde(default)]
    pub fields: Option<Value>,
    #[serde(default)]
    pub record_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordPayload {
    #[serde(default)]
    pub integration_key: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordQuery {
    pub id: Option<String>,
    pub integration_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecordsQuery {
    pub record_type: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl ListRecordsQuery {
    pub fn into_record_query(self, customer_id: &str) -> RecordQuery {
        RecordQuery {
            customer_id: customer_id.to_string(),
            record_type: self.record_type.filter(|t| !t.is_empty()),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            skip: self.skip.unwrap_or(0),
        }
    }
}

pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<Arc<AuthContext>>,
    payload: Result<Json<CreateRecordPayload>, JsonRejection>,
) -> Result<Json<SuccessResponse<Value>>, RecordSyncError> {
    let payload = json_payload(payload)?;

    let integration_key = required_str(
        payload.integration_key.as_deref(),
        "Integration key is required",
    )?;
    let fields = required_fields(payload.fields.as_ref())?;

    let record_type = payload
        .record_type
        .as_deref()
        .unwrap_or(DEFAULT_RECORD_ACTION);
    if RecordAction::find(record_type).is_none() {
        return Err(ApplicationError::not_found(
            &format!("Record action not found: {record_type}"),
            None,
        ));
    }

    let connection = resolve_connection(&state, &auth, integration_key).await?;

    let mutation = RecordMutation::Create { fields };
    let action_key = state.config.actions_config.key_for(mutation.operation());

    match state
        .integration
        .run_action(&auth, &connection.id, action_key, &mutation.input())
        .await
    {
        Ok(output) => Ok(Json(SuccessResponse::new(output))),
        Err(e) => {
            error!("Error creating record through {integration_key}: {e}");
            Err(e)
        }
    }
}

pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<Arc<AuthContext>>,
    payload: Result<Json<UpdateRecordPayload>, JsonRejection>,
) -> Result<Json<SuccessResponse<Value>>, RecordSyncError> {
    let payload = json_payload(payload)?;

    let integration_key = required_str(
        payload.integration_key.as_deref(),
        "Integration key is required",
    )?;
    let id = required_str(payload.id.as_deref(), "Record ID is required")?;
    let fields = required_fields(payload.fields.as_ref())?;

    let connection = resolve_connection(&state, &auth, integration_key).await?;

    let mutation = RecordMutation::Update { id, fields };
    let action_key = state.config.actions_config.key_for(mutation.operation());

    match state
        .integration
        .run_action(&auth, &connection.id, action_key, &mutation.input())
        .await
    {
        Ok(output) => Ok(Json(SuccessResponse::new(output))),
        Err(e) => {
            error!("Error updating record {id} through {integration_key}: {e}");
            Err(e)
        }
    }
}

/// Removes the record remotely when possible and locally in any case.
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<Arc<AuthContext>>,
    query: Result<Query<DeleteRecordQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, RecordSyncError> {
    let query = query_params(query)?;

    let id = required_str(query.id.as_deref(), "Record ID is required")?;
    let integration_key = required_str(
        query.integration_key.as_deref(),
        "Integration key is required",
    )?;

    let scope = RecordScope::new(id, &auth.customer_id);

    let Some(record) = (match state.records.find_one(scope).await {
        Ok(record) => record,
        Err(e) => {
            error!("Could not get record {id} from store: {e}");
            return Err(e);
        }
    }) else {
        return Err(ApplicationError::not_found("Record not found", None));
    };

    let connection = resolve_connection(&state, &auth, integration_key).await?;

    let external_id = record.external_id();
    let mutation = RecordMutation::Delete { id: &external_id };
    let action_key = state.config.actions_config.key_for(mutation.operation());

    if let Err(e) = state
        .integration
        .run_action(&auth, &connection.id, action_key, &mutation.input())
        .await
    {
        warn!("Remote delete of {external_id} through {integration_key} failed, deleting locally: {e}");
    }

    match state.records.delete_one(scope).await {
        Ok(true) => info!("Deleted record {id} for {}", auth.customer_id),
        Ok(false) => warn!("Record {id} was already removed for {}", auth.customer_id),
        Err(e) => {
            error!("Could not delete record {id} from store: {e}");
            return Err(e);
        }
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Record deleted successfully".to_string(),
    }))
}

pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<Arc<AuthContext>>,
    query: Result<Query<ListRecordsQuery>, QueryRejection>,
) -> Result<Json<SuccessResponse<ReadResponse<Record>>>, RecordSyncError> {
    let query = query_params(query)?.into_record_query(&auth.customer_id);

    let (rows, total) = match try_join!(
        state.records.find_many(&query),
        state.records.count(&query)
    ) {
        Ok(result) => result,
        Err(e) => {
            error!("Error reading records from store: {e}");
            return Err(e);
        }
    };

    Ok(Json(SuccessResponse::new(ReadResponse {
        rows,
        total,
        skip: query.skip,
        limit: query.limit,
    })))
}
