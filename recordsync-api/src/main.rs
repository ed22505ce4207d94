use anyhow::Result;
use dotenvy::dotenv;
use envconfig::Envconfig;
use recordsync_api::{config::Config, server::Server};
use recordsync_domain::telemetry::{get_subscriber, init_subscriber};
use tracing::info;

fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::init_from_env()?;

    let subscriber = get_subscriber("recordsync-api", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    info!("Starting API with config:\n{config}");

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads.unwrap_or(num_cpus::get()))
        .enable_all()
        .build()?
        .block_on(async move {
            let server = Server::init(config).await?;

            server.run().await
        })
}
