use anyhow::Context;
use lawatch_backend::{
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    routes,
    services::{dataset::Dataset, pg_store::PgStore},
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lawatch_backend=info,tower_http=info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    init_config().context("loading configuration")?;
    let config = Arc::new(get_config().clone());

    let pool = create_pool(&config)
        .await
        .context("connecting to the database")?;
    run_migrations(&pool).await.context("running migrations")?;

    let dataset = Dataset::load(&config.data_dir)
        .with_context(|| format!("loading dataset from {}", config.data_dir.display()))?;

    let app_state = AppState::new(
        config.clone(),
        Arc::new(PgStore::new(pool)),
        Arc::new(dataset),
    );
    let app = routes::router(app_state);

    let addr: SocketAddr = config
        .server_address
        .parse()
        .with_context(|| format!("invalid SERVER_ADDRESS {}", config.server_address))?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
