use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shoplist::{Config, JsonFileStore, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::parse();
    info!(data_file = %config.data_file.display(), "starting shoplist");

    let store = Arc::new(JsonFileStore::new(&config.data_file));
    let app = shoplist::app(store);

    Server::bind(&config.listen_addr())
        .await?
        .serve(app)
        .await?;

    Ok(())
}
