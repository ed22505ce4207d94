use crate::{AuthContext, ConnectionPage, RecordSyncError};
use async_trait::async_trait;
use serde_json::Value;

/// Access to the integration platform on behalf of one customer.
#[async_trait]
pub trait IntegrationClientExt {
    async fn list_connections(&self, auth: &AuthContext) -> Result<ConnectionPage, RecordSyncError>;

    /// Runs `action_key` on the connection and returns the action `output`.
    async fn run_action(
        &self,
        auth: &AuthContext,
        connection_id: &str,
        action_key: &str,
        input: &Value,
    ) -> Result<Value, RecordSyncError>;
}
