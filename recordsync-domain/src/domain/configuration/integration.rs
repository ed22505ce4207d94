use envconfig::Envconfig;
use secrecy::SecretString;
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, Envconfig)]
pub struct IntegrationConfig {
    #[envconfig(from = "INTEGRATION_API_URL", default = "https://api.integration.app")]
    pub api_url: String,
    #[envconfig(from = "INTEGRATION_WORKSPACE_KEY", default = "")]
    pub workspace_key: String,
    #[envconfig(from = "INTEGRATION_WORKSPACE_SECRET", default = "")]
    pub workspace_secret: SecretString,
    #[envconfig(from = "INTEGRATION_TOKEN_TTL_SECS", default = "7200")]
    pub token_ttl_secs: u64,
}

impl IntegrationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_workspace(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.workspace_key = key.into();
        self.workspace_secret = SecretString::new(secret.into());
        self
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.integration.app".to_owned(),
            workspace_key: String::new(),
            workspace_secret: SecretString::new(String::new()),
            token_ttl_secs: 7200,
        }
    }
}

impl Display for IntegrationConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "INTEGRATION_API_URL: {}", self.api_url)?;
        writeln!(f, "INTEGRATION_WORKSPACE_KEY: {}", self.workspace_key)?;
        writeln!(f, "INTEGRATION_WORKSPACE_SECRET: ***")?;
        writeln!(f, "INTEGRATION_TOKEN_TTL_SECS: {}", self.token_ttl_secs)
    }
}
