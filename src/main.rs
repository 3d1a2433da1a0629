use std::{sync::Arc, time::Duration};

use anyhow::Result;
use blogsite::{
    config::config_loader,
    infrastructure::{
        axum_http::http_serve,
        postgres::postgres_connection::{self, PgStore},
    },
    observability,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Blogsite exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("blogsite", config_loader::get_stage())?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database)?;
    info!("Postgres connection has been established");

    let store = PgStore::new(
        Arc::new(postgres_pool),
        Duration::from_secs(dotenvy_env.database.store_timeout_secs),
    );

    http_serve::start(Arc::new(dotenvy_env), Arc::new(store)).await?;

    Ok(())
}
