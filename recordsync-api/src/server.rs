use crate::{config::Config, router};
use anyhow::{Context, Result};
use axum::Router;
use mongodb::Client;
use recordsync_domain::{
    IntegrationAppClient, IntegrationClientExt, MongoStore, Record, RecordStoreExt, Store,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub records: Arc<dyn RecordStoreExt + Sync + Send>,
    pub integration: Arc<dyn IntegrationClientExt + Sync + Send>,
}

#[derive(Clone)]
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub async fn init(config: Config) -> Result<Self> {
        let client = Client::with_uri_str(&config.db_config.db_url).await?;
        let db = client.database(&config.db_config.db_name);

        let records = MongoStore::<Record>::new(&db, &Store::Records).await?;
        if let Err(e) = records.ensure_indexes().await {
            warn!("Could not ensure record indexes: {e}");
        }

        let http_client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.http_client_timeout_secs))
            .build()?;
        let integration = IntegrationAppClient::new(&config.integration_config, http_client);

        Ok(Self::with_parts(
            config,
            Arc::new(records),
            Arc::new(integration),
        ))
    }

    pub fn with_parts(
        config: Config,
        records: Arc<dyn RecordStoreExt + Sync + Send>,
        integration: Arc<dyn IntegrationClientExt + Sync + Send>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                config,
                records,
                integration,
            }),
        }
    }

    pub fn router(&self) -> Router {
        router::get_router(&self.state).with_state(self.state.clone())
    }

    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.state.config.address)
            .await
            .with_context(|| format!("Could not bind to {}", self.state.config.address))?;

        self.serve(listener).await
    }

    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        info!("Api server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .await
            .context("Api server stopped")
    }
}
