use envconfig::Envconfig;
use recordsync_domain::{
    actions::ActionsConfig, database::DatabaseConfig, integration::IntegrationConfig,
};
use std::{
    fmt::{Display, Formatter, Result},
    net::SocketAddr,
};

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(from = "WORKER_THREADS")]
    pub worker_threads: Option<usize>,
    #[envconfig(from = "INTERNAL_SERVER_ADDRESS", default = "0.0.0.0:3005")]
    pub address: SocketAddr,
    #[envconfig(from = "HTTP_CLIENT_TIMEOUT_SECS", default = "30")]
    pub http_client_timeout_secs: u64,
    #[envconfig(from = "API_PREFIX", default = "api")]
    pub api_prefix: String,
    #[envconfig(nested = true)]
    pub headers: Headers,
    #[envconfig(nested = true)]
    pub db_config: DatabaseConfig,
    #[envconfig(nested = true)]
    pub integration_config: IntegrationConfig,
    #[envconfig(nested = true)]
    pub actions_config: ActionsConfig,
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "WORKER_THREADS: {:?}", self.worker_threads)?;
        writeln!(f, "INTERNAL_SERVER_ADDRESS: {}", self.address)?;
        writeln!(
            f,
            "HTTP_CLIENT_TIMEOUT_SECS: {}",
            self.http_client_timeout_secs
        )?;
        writeln!(f, "API_PREFIX: {}", self.api_prefix)?;
        write!(f, "{}", self.headers)?;
        write!(f, "{}", self.db_config)?;
        write!(f, "{}", self.integration_config)?;
        write!(f, "{}", self.actions_config)
    }
}

/// Names of the headers the customer identity is read from.
#[derive(Envconfig, Clone)]
pub struct Headers {
    #[envconfig(from = "HEADER_AUTH_ID", default = "x-auth-id")]
    pub auth_id_header: String,
    #[envconfig(from = "HEADER_CUSTOMER_NAME", default = "x-customer-name")]
    pub customer_name_header: String,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            auth_id_header: "x-auth-id".to_owned(),
            customer_name_header: "x-customer-name".to_owned(),
        }
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "HEADER_AUTH_ID: {}", self.auth_id_header)?;
        writeln!(f, "HEADER_CUSTOMER_NAME: {}", self.customer_name_header)
    }
}
