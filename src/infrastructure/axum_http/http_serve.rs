use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE, HeaderName},
    },
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    application::validation::PayloadValidator,
    config::config_model::DotEnvyConfig,
    infrastructure::{
        axum_http::{auth::USER_ID_HEADER, default_routers, routers},
        postgres::postgres_connection::PgStore,
    },
};

pub fn app(config: Arc<DotEnvyConfig>, store: Arc<PgStore>) -> Result<Router> {
    let validator = Arc::new(PayloadValidator::new());

    let api = Router::new()
        .merge(routers::users::routes(Arc::clone(&store), Arc::clone(&validator)))
        .merge(routers::sites::routes(Arc::clone(&store), Arc::clone(&validator)))
        .merge(routers::posts::routes(Arc::clone(&store), Arc::clone(&validator)))
        .merge(routers::payments::routes(
            Arc::clone(&store),
            Arc::clone(&config),
            Arc::clone(&validator),
        )?)
        .nest(
            "/subscriptions",
            routers::subscriptions::routes(Arc::clone(&store), Arc::clone(&validator)),
        )
        .route("/health-check", get(default_routers::health_check));

    let app = Router::new()
        .nest("/api/v1", api)
        .fallback(default_routers::not_found)
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([
                    AUTHORIZATION,
                    CONTENT_TYPE,
                    HeaderName::from_static(USER_ID_HEADER),
                ])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

pub async fn start(config: Arc<DotEnvyConfig>, store: Arc<PgStore>) -> Result<()> {
    let app = app(Arc::clone(&config), store)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
