use anyhow::Result;
use delivery_service::{
    config::config_loader,
    infrastructure::{
        axum_http::{http_serve, validation::RequestValidator},
        postgres::postgres_connection,
    },
    observability,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Delivery service exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("delivery-service")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let validator = RequestValidator::new()?;
    info!("Request validator is ready");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database)?;
    info!(
        max_connections = dotenvy_env.database.max_connections,
        "Postgres connection has been established"
    );

    http_serve::start(
        Arc::new(dotenvy_env),
        Arc::new(postgres_pool),
        Arc::new(validator),
    )
    .await?;

    Ok(())
}
