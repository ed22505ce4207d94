use crate::{
    configuration::integration::IntegrationConfig, AuthContext, ConnectionPage,
    IntegrationClientExt, InternalError, RecordSyncError, RemoteActionError,
};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Claims of the customer token the integration platform authenticates with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerClaims {
    pub id: String,
    pub name: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct ActionRunResponse {
    #[serde(default)]
    output: Value,
}

#[derive(Clone)]
pub struct IntegrationAppClient {
    http: reqwest::Client,
    api_url: String,
    workspace_key: String,
    workspace_secret: SecretString,
    token_ttl_secs: u64,
}

impl IntegrationAppClient {
    pub fn new(config: &IntegrationConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            workspace_key: config.workspace_key.clone(),
            workspace_secret: config.workspace_secret.clone(),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    /// HS512 token signed with the workspace secret, issued for one customer.
    pub fn customer_token(&self, auth: &AuthContext) -> Result<String, RecordSyncError> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.token_ttl_secs)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                InternalError::configuration_error(
                    &format!("Token TTL of {}s is out of range", self.token_ttl_secs),
                    None,
                )
            })?;
        let claims = CustomerClaims {
            id: auth.customer_id.clone(),
            name: auth.display_name().to_string(),
            iss: self.workspace_key.clone(),
            iat: now,
            exp,
        };

        jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(self.workspace_secret.expose_secret().as_bytes()),
        )
        .map_err(|err| {
            InternalError::signing_error(&format!("Failed to sign customer token: {err}"), None)
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, RecordSyncError> {
        let response = request
            .send()
            .await
            .map_err(|err| RemoteActionError::transport(&format!("Failed to send request: {err}")))?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, RecordSyncError> {
        let status = response.status();
        let content = response.text().await.map_err(|err| {
            RemoteActionError::transport(&format!("Failed to read response: {err}"))
        })?;

        if status.is_success() {
            return Ok(content);
        }

        let data = serde_json::from_str::<Value>(&content).ok();
        let message = data
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        Err(RemoteActionError::integration_app(
            status.as_u16(),
            &message,
            data,
        ))
    }
}

#[async_trait]
impl IntegrationClientExt for IntegrationAppClient {
    async fn list_connections(&self, auth: &AuthContext) -> Result<ConnectionPage, RecordSyncError> {
        let token = self.customer_token(auth)?;
        let url = format!("{}/connections", self.api_url);

        debug!("Listing connections for customer {}", auth.customer_id);

        let body = self.send(self.http.get(url).bearer_auth(token)).await?;

        serde_json::from_str::<ConnectionPage>(&body).map_err(|err| {
            InternalError::deserialize_error(
                &format!("Failed to deserialize connections: {err}"),
                None,
            )
        })
    }

    async fn run_action(
        &self,
        auth: &AuthContext,
        connection_id: &str,
        action_key: &str,
        input: &Value,
    ) -> Result<Value, RecordSyncError> {
        let token = self.customer_token(auth)?;
        let url = format!(
            "{}/connections/{connection_id}/actions/{action_key}/run",
            self.api_url
        );

        debug!("Running action {action_key} on connection {connection_id}");

        let body = self
            .send(self.http.post(url).bearer_auth(token).json(input))
            .await?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let response = serde_json::from_str::<ActionRunResponse>(&body).map_err(|err| {
            InternalError::deserialize_error(
                &format!("Failed to deserialize action response: {err}"),
                None,
            )
        })?;

        Ok(response.output)
    }
}
