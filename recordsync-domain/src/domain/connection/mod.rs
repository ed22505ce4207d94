use serde::{Deserialize, Serialize};

/// A customer's link to one external integration, as reported by the
/// integration platform. Read-only from our side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub integration: Option<IntegrationRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Connection {
    pub fn integration_key(&self) -> Option<&str> {
        self.integration.as_ref()?.key.as_deref()
    }

    pub fn is_for(&self, integration_key: &str) -> bool {
        self.integration_key() == Some(integration_key)
    }
}

/// One page of `GET /connections`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPage {
    #[serde(default)]
    pub items: Vec<Connection>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl ConnectionPage {
    pub fn find_by_integration_key(&self, integration_key: &str) -> Option<&Connection> {
        self.items.iter().find(|c| c.is_for(integration_key))
    }
}

/// What the connections endpoint exposes for each connected integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedIntegration {
    pub connection_id: String,
    pub integration_key: String,
    pub name: Option<String>,
}

impl ConnectedIntegration {
    pub fn from_connection(connection: &Connection) -> Option<Self> {
        let integration = connection.integration.as_ref()?;

        Some(Self {
            connection_id: connection.id.clone(),
            integration_key: integration.key.clone()?,
            name: integration
                .name
                .clone()
                .or_else(|| connection.name.clone()),
        })
    }
}
